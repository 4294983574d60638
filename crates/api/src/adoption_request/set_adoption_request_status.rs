use crate::error::PawError;
use crate::notification::{
    fan_out::{notify, NotificationMessage},
    templates::status_email,
};
use crate::shared::{
    auth::protect_foundation_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::set_adoption_request_status::*;
use pawhome_domain::{
    AdoptionRequest, AdoptionRequestStatus, InvalidTransitionError, NotificationKind,
    PetAvailability, StatusChange, ID,
};
use pawhome_infra::PawContext;
use tracing::{error, info};

pub async fn set_adoption_request_status_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let member = protect_foundation_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = SetAdoptionRequestStatusUseCase {
        request_id: path.request_id.clone(),
        foundation_id: member.foundation_id,
        status: body.status,
        notes: body.notes,
    };
    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.request)))
        .map_err(|e| match e {
            UseCaseError::InvalidStatus(msg) => PawError::BadClientData(msg),
            UseCaseError::NotFound(id) => PawError::NotFound(format!(
                "An adoption request with id: {}, was not found.",
                id
            )),
            UseCaseError::InvalidTransition(e) => PawError::Conflict(e.to_string()),
            UseCaseError::SiblingAlreadyApproved(id) => PawError::Conflict(format!(
                "Another adoption request for this pet is already approved: {}",
                id
            )),
            UseCaseError::StorageError => PawError::InternalError,
        })
}

#[derive(Debug)]
pub struct SetAdoptionRequestStatusUseCase {
    pub request_id: ID,
    /// Foundation of the acting member. Requests of other foundations are not visible.
    pub foundation_id: ID,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub request: AdoptionRequest,
    /// Siblings rejected because this request got approved
    pub rejected_siblings: Vec<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidStatus(String),
    NotFound(ID),
    InvalidTransition(InvalidTransitionError),
    SiblingAlreadyApproved(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetAdoptionRequestStatusUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "SetAdoptionRequestStatus";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        let status = self
            .status
            .parse::<AdoptionRequestStatus>()
            .map_err(|e| UseCaseError::InvalidStatus(e.to_string()))?;

        let mut request = match ctx.repos.adoption_requests.find(&self.request_id).await {
            Some(r) if r.foundation_id == self.foundation_id => r,
            _ => return Err(UseCaseError::NotFound(self.request_id.clone())),
        };

        if status == AdoptionRequestStatus::Approved && request.status != status {
            let siblings = ctx
                .repos
                .adoption_requests
                .find_by_pet(&request.pet_id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            // Not atomic with the write below, concurrent approvals of the same
            // pet can both pass this check
            if let Some(approved) = siblings
                .iter()
                .find(|s| s.id != request.id && s.status == AdoptionRequestStatus::Approved)
            {
                return Err(UseCaseError::SiblingAlreadyApproved(approved.id.clone()));
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let change = request
            .set_status(status, self.notes.take(), now)
            .map_err(UseCaseError::InvalidTransition)?;
        ctx.repos
            .adoption_requests
            .save(&request)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if change == StatusChange::Unchanged {
            return Ok(UseCaseResponse {
                request,
                rejected_siblings: Vec::new(),
            });
        }

        let pet_name = match ctx.repos.pets.find(&request.pet_id).await {
            Some(pet) => pet.name,
            None => "your pet".to_string(),
        };

        notify_status_change(ctx, &request, &pet_name).await;

        let rejected_siblings = if change.is_approval() {
            cascade_approval(ctx, &request, &pet_name, now).await
        } else {
            Vec::new()
        };

        Ok(UseCaseResponse {
            request,
            rejected_siblings,
        })
    }
}

/// In-app copy for a status the applicant should hear about
fn status_notification(
    status: AdoptionRequestStatus,
    pet_name: &str,
) -> Option<(NotificationKind, String, String)> {
    match status {
        AdoptionRequestStatus::Approved => Some((
            NotificationKind::AdoptionRequestApproved,
            "Adoption request approved".to_string(),
            format!(
                "Your request to adopt {} was approved! The foundation will contact you to coordinate the adoption.",
                pet_name
            ),
        )),
        AdoptionRequestStatus::Rejected => Some((
            NotificationKind::AdoptionRequestRejected,
            "Adoption request not approved".to_string(),
            format!("Your request to adopt {} was not approved.", pet_name),
        )),
        AdoptionRequestStatus::Contacted => Some((
            NotificationKind::AdoptionRequestContacted,
            "The foundation is contacting you".to_string(),
            format!(
                "The foundation reviewed your request to adopt {} and will get in touch with you soon.",
                pet_name
            ),
        )),
        AdoptionRequestStatus::Pending => None,
    }
}

async fn notify_status_change(ctx: &PawContext, request: &AdoptionRequest, pet_name: &str) {
    let user_id = match &request.user_id {
        Some(id) => id,
        None => return,
    };
    let (kind, title, message) = match status_notification(request.status, pet_name) {
        Some(copy) => copy,
        None => return,
    };

    let msg = NotificationMessage {
        kind,
        title,
        message,
        adoption_request_id: Some(request.id.clone()),
        templated_email: status_email(
            request.status,
            &request.applicant.full_name,
            pet_name,
            request.notes.as_deref(),
        ),
    };
    if let Err(e) = notify(ctx, user_id, msg).await {
        error!(
            "Unable to notify user {} about adoption request {}: {:?}",
            user_id, request.id, e
        );
    }
}

/// Side effects of an approval: the pet is taken off the catalog and every
/// other pending request for it is rejected. Each step is attempted on its own
/// and failures are logged so that one bad sibling does not stop the rest.
async fn cascade_approval(
    ctx: &PawContext,
    approved: &AdoptionRequest,
    pet_name: &str,
    now: i64,
) -> Vec<ID> {
    if let Err(e) = ctx
        .repos
        .pets
        .set_availability(&approved.pet_id, PetAvailability::Unavailable)
        .await
    {
        error!(
            "Unable to mark pet {} as unavailable after approving {}: {:?}",
            approved.pet_id, approved.id, e
        );
    }

    let siblings = match ctx
        .repos
        .adoption_requests
        .find_by_pet(&approved.pet_id)
        .await
    {
        Ok(siblings) => siblings,
        Err(e) => {
            error!(
                "Unable to find sibling requests of pet {}: {:?}",
                approved.pet_id, e
            );
            return Vec::new();
        }
    };

    let mut rejected = Vec::new();
    for mut sibling in siblings
        .into_iter()
        .filter(|s| s.id != approved.id && s.status == AdoptionRequestStatus::Pending)
    {
        sibling.reject_by_cascade(now);
        if let Err(e) = ctx.repos.adoption_requests.save(&sibling).await {
            error!("Unable to reject sibling request {}: {:?}", sibling.id, e);
            continue;
        }
        rejected.push(sibling.id.clone());
        notify_status_change(ctx, &sibling, pet_name).await;
    }

    info!(
        "Approval of request {} rejected {} sibling request(s)",
        approved.id,
        rejected.len()
    );
    rejected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adoption_request::submit_adoption_request::SubmitAdoptionRequestUseCase;
    use crate::shared::test_utils::{applicant, insert_pet, insert_user, setup_context};
    use pawhome_domain::{Pet, User, CASCADE_REJECTION_NOTE};
    use pawhome_infra::{InMemoryAdoptionRequestRepo, InMemoryNotificationRepo};
    use std::sync::Arc;

    async fn submit(ctx: &PawContext, pet: &Pet, user: &User) -> AdoptionRequest {
        SubmitAdoptionRequestUseCase {
            pet_id: pet.id.clone(),
            user: Some(user.clone()),
            applicant: applicant(user),
        }
        .execute(ctx)
        .await
        .unwrap()
    }

    fn set_status(pet: &Pet, request: &AdoptionRequest, status: &str) -> SetAdoptionRequestStatusUseCase {
        SetAdoptionRequestStatusUseCase {
            request_id: request.id.clone(),
            foundation_id: pet.foundation_id.clone().unwrap(),
            status: status.to_string(),
            notes: None,
        }
    }

    async fn status_of(ctx: &PawContext, request: &AdoptionRequest) -> AdoptionRequestStatus {
        ctx.repos
            .adoption_requests
            .find(&request.id)
            .await
            .unwrap()
            .status
    }

    #[actix_web::test]
    async fn approval_cascades_to_pending_siblings_only() {
        let test = setup_context();
        let ctx = &test.ctx;
        let pet = insert_pet(ctx, "Luna").await;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let leo = insert_user(ctx, "Leo", "leo@example.com").await;
        let mia = insert_user(ctx, "Mia", "mia@example.com").await;
        let sam = insert_user(ctx, "Sam", "sam@example.com").await;
        let tom = insert_user(ctx, "Tom", "tom@example.com").await;

        let approved = submit(ctx, &pet, &ana).await;
        let pending_1 = submit(ctx, &pet, &leo).await;
        let pending_2 = submit(ctx, &pet, &mia).await;
        let contacted = submit(ctx, &pet, &sam).await;
        let rejected = submit(ctx, &pet, &tom).await;
        set_status(&pet, &contacted, "contacted").execute(ctx).await.unwrap();
        set_status(&pet, &rejected, "rejected").execute(ctx).await.unwrap();

        let res = set_status(&pet, &approved, "approved")
            .execute(ctx)
            .await
            .unwrap();
        assert_eq!(res.rejected_siblings, vec![pending_1.id.clone(), pending_2.id.clone()]);

        assert_eq!(status_of(ctx, &approved).await, AdoptionRequestStatus::Approved);
        assert_eq!(status_of(ctx, &contacted).await, AdoptionRequestStatus::Contacted);
        assert_eq!(status_of(ctx, &rejected).await, AdoptionRequestStatus::Rejected);
        for sibling in [&pending_1, &pending_2] {
            let stored = ctx.repos.adoption_requests.find(&sibling.id).await.unwrap();
            assert_eq!(stored.status, AdoptionRequestStatus::Rejected);
            assert_eq!(stored.notes.as_deref(), Some(CASCADE_REJECTION_NOTE));
        }

        let pet = ctx.repos.pets.find(&pet.id).await.unwrap();
        assert_eq!(pet.availability, PetAvailability::Unavailable);

        let leo_notifications = ctx.repos.notifications.find_by_user(&leo.id).await.unwrap();
        assert_eq!(leo_notifications[0].kind, NotificationKind::AdoptionRequestRejected);
        assert!(leo_notifications[0].message.contains("Luna"));
        // Siblings that were not pending are not notified again
        let sam_notifications = ctx.repos.notifications.find_by_user(&sam.id).await.unwrap();
        assert_eq!(sam_notifications[0].kind, NotificationKind::AdoptionRequestContacted);
    }

    #[actix_web::test]
    async fn cascade_continues_past_failing_emails() {
        let test = setup_context();
        let ctx = &test.ctx;
        let pet = insert_pet(ctx, "Luna").await;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let leo = insert_user(ctx, "Leo", "leo@example.com").await;
        let mia = insert_user(ctx, "Mia", "mia@example.com").await;

        let approved = submit(ctx, &pet, &ana).await;
        let first = submit(ctx, &pet, &leo).await;
        let second = submit(ctx, &pet, &mia).await;
        test.email.fail_for("leo@example.com");
        test.email.fail_for("ana@example.com");

        let res = set_status(&pet, &approved, "approved")
            .execute(ctx)
            .await
            .unwrap();
        assert_eq!(res.rejected_siblings.len(), 2);
        assert_eq!(status_of(ctx, &first).await, AdoptionRequestStatus::Rejected);
        assert_eq!(status_of(ctx, &second).await, AdoptionRequestStatus::Rejected);

        let leo_notifications = ctx.repos.notifications.find_by_user(&leo.id).await.unwrap();
        assert_eq!(leo_notifications[0].kind, NotificationKind::AdoptionRequestRejected);
        assert!(!leo_notifications[0].email_sent);
        assert!(test
            .email
            .sent_to("mia@example.com")
            .iter()
            .any(|e| e.subject == "Adoption request not approved"));
    }

    #[actix_web::test]
    async fn cascade_continues_past_failing_storage() {
        let mut test = setup_context();
        let requests = Arc::new(InMemoryAdoptionRequestRepo::new());
        let notifications = Arc::new(InMemoryNotificationRepo::new());
        test.ctx.repos.adoption_requests = requests.clone();
        test.ctx.repos.notifications = notifications.clone();
        let ctx = &test.ctx;

        let pet = insert_pet(ctx, "Luna").await;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let leo = insert_user(ctx, "Leo", "leo@example.com").await;
        let mia = insert_user(ctx, "Mia", "mia@example.com").await;
        let sam = insert_user(ctx, "Sam", "sam@example.com").await;

        let approved = submit(ctx, &pet, &ana).await;
        let unnotified = submit(ctx, &pet, &leo).await;
        let unsaved = submit(ctx, &pet, &mia).await;
        let last = submit(ctx, &pet, &sam).await;
        notifications.fail_for(&leo.id);
        requests.fail_saves_for(&unsaved.id);

        let res = set_status(&pet, &approved, "approved")
            .execute(ctx)
            .await
            .unwrap();
        assert_eq!(res.request.status, AdoptionRequestStatus::Approved);
        assert_eq!(res.rejected_siblings, vec![unnotified.id.clone(), last.id.clone()]);

        assert_eq!(status_of(ctx, &unnotified).await, AdoptionRequestStatus::Rejected);
        assert_eq!(status_of(ctx, &unsaved).await, AdoptionRequestStatus::Pending);
        assert_eq!(status_of(ctx, &last).await, AdoptionRequestStatus::Rejected);

        // The rejected sibling after the failures is still notified
        let sam_notifications = ctx.repos.notifications.find_by_user(&sam.id).await.unwrap();
        assert_eq!(sam_notifications[0].kind, NotificationKind::AdoptionRequestRejected);
        assert_eq!(sam_notifications[0].adoption_request_id, Some(last.id.clone()));
        let pet = ctx.repos.pets.find(&pet.id).await.unwrap();
        assert_eq!(pet.availability, PetAvailability::Unavailable);
    }

    #[actix_web::test]
    async fn status_change_sends_notification_and_templated_email() {
        let test = setup_context();
        let ctx = &test.ctx;
        let pet = insert_pet(ctx, "Luna").await;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let request = submit(ctx, &pet, &ana).await;
        let emails_before = test.email.sent_to("ana@example.com").len();

        let mut usecase = set_status(&pet, &request, "contacted");
        usecase.notes = Some("Call on monday".into());
        let res = usecase.execute(ctx).await.unwrap();
        assert_eq!(res.request.notes.as_deref(), Some("Call on monday"));

        let sent = test.email.sent_to("ana@example.com");
        assert_eq!(sent.len(), emails_before + 2);
        assert!(sent.last().unwrap().html.contains("Call on monday"));
        let notifications = ctx.repos.notifications.find_by_user(&ana.id).await.unwrap();
        assert_eq!(notifications[0].kind, NotificationKind::AdoptionRequestContacted);
        assert_eq!(notifications[0].adoption_request_id, Some(request.id.clone()));
    }

    #[actix_web::test]
    async fn resetting_same_status_only_edits_notes() {
        let test = setup_context();
        let ctx = &test.ctx;
        let pet = insert_pet(ctx, "Luna").await;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let request = submit(ctx, &pet, &ana).await;
        set_status(&pet, &request, "approved").execute(ctx).await.unwrap();
        let notifications_before = ctx.repos.notifications.find_by_user(&ana.id).await.unwrap().len();

        let mut usecase = set_status(&pet, &request, "APPROVED");
        usecase.notes = Some("Pick up on friday".into());
        let res = usecase.execute(ctx).await.unwrap();
        assert!(res.rejected_siblings.is_empty());
        assert_eq!(res.request.notes.as_deref(), Some("Pick up on friday"));
        assert_eq!(
            ctx.repos.notifications.find_by_user(&ana.id).await.unwrap().len(),
            notifications_before
        );
    }

    #[actix_web::test]
    async fn final_statuses_can_not_be_left() {
        let test = setup_context();
        let ctx = &test.ctx;
        let pet = insert_pet(ctx, "Luna").await;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let request = submit(ctx, &pet, &ana).await;
        set_status(&pet, &request, "rejected").execute(ctx).await.unwrap();

        let res = set_status(&pet, &request, "pending").execute(ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidTransition(_))));
        assert_eq!(status_of(ctx, &request).await, AdoptionRequestStatus::Rejected);
    }

    #[actix_web::test]
    async fn at_most_one_approved_request_per_pet() {
        let test = setup_context();
        let ctx = &test.ctx;
        let pet = insert_pet(ctx, "Luna").await;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let leo = insert_user(ctx, "Leo", "leo@example.com").await;
        let first = submit(ctx, &pet, &ana).await;
        let second = submit(ctx, &pet, &leo).await;
        // Moved out of pending before the approval so the cascade skips it
        set_status(&pet, &second, "contacted").execute(ctx).await.unwrap();
        set_status(&pet, &first, "approved").execute(ctx).await.unwrap();

        let res = set_status(&pet, &second, "approved").execute(ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::SiblingAlreadyApproved(first.id.clone())
        );

        let approved = ctx
            .repos
            .adoption_requests
            .find_by_pet(&pet.id)
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.status == AdoptionRequestStatus::Approved)
            .count();
        assert_eq!(approved, 1);
    }

    #[actix_web::test]
    async fn rejects_bad_status_and_foreign_foundation() {
        let test = setup_context();
        let ctx = &test.ctx;
        let pet = insert_pet(ctx, "Luna").await;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let request = submit(ctx, &pet, &ana).await;

        let res = set_status(&pet, &request, "adopted").execute(ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidStatus(_))));

        let mut usecase = set_status(&pet, &request, "approved");
        usecase.foundation_id = ID::default();
        assert_eq!(
            usecase.execute(ctx).await.unwrap_err(),
            UseCaseError::NotFound(request.id.clone())
        );

        let mut usecase = set_status(&pet, &request, "approved");
        usecase.request_id = ID::default();
        assert!(matches!(
            usecase.execute(ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn request_without_user_changes_status_silently() {
        let test = setup_context();
        let ctx = &test.ctx;
        let pet = insert_pet(ctx, "Luna").await;
        let ana = User::new("Ana", "ana@example.com");
        let request = SubmitAdoptionRequestUseCase {
            pet_id: pet.id.clone(),
            user: None,
            applicant: applicant(&ana),
        }
        .execute(ctx)
        .await
        .unwrap();
        let emails_before = test.email.outbox().len();

        let res = set_status(&pet, &request, "approved").execute(ctx).await.unwrap();
        assert_eq!(res.request.status, AdoptionRequestStatus::Approved);
        assert_eq!(test.email.outbox().len(), emails_before);
    }
}
