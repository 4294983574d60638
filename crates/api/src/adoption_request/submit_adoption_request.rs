use crate::error::PawError;
use crate::notification::{
    fan_out::{notify, NotificationMessage},
    templates::request_received_email,
};
use crate::shared::{
    auth::protect_optional_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::submit_adoption_request::*;
use pawhome_domain::{
    AdoptionRequest, AdoptionRequestStatus, ApplicantDetails, NotificationKind, Pet, User, ID,
};
use pawhome_infra::PawContext;
use tracing::{error, warn};

pub async fn submit_adoption_request_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let user = protect_optional_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = SubmitAdoptionRequestUseCase {
        pet_id: body.pet_id,
        user,
        applicant: body.applicant,
    };
    execute(usecase, &ctx)
        .await
        .map(|request| HttpResponse::Created().json(APIResponse::new(request)))
        .map_err(|e| match e {
            UseCaseError::MissingFields(fields) => PawError::BadClientData(format!(
                "The following fields are required: {}",
                fields.join(", ")
            )),
            UseCaseError::PetNotFound(id) => {
                PawError::NotFound(format!("A pet with id: {}, was not found.", id))
            }
            UseCaseError::PetUnavailable(id) => PawError::Conflict(format!(
                "The pet with id: {}, is not available for adoption.",
                id
            )),
            UseCaseError::PetWithoutFoundation(id) => PawError::Integrity(format!(
                "The pet with id: {}, is not assigned to any foundation.",
                id
            )),
            UseCaseError::DuplicatePendingRequest => PawError::Conflict(
                "You already have a pending adoption request for this pet.".into(),
            ),
            UseCaseError::StorageError => PawError::InternalError,
        })
}

#[derive(Debug)]
pub struct SubmitAdoptionRequestUseCase {
    pub pet_id: ID,
    pub user: Option<User>,
    pub applicant: ApplicantDetails,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingFields(Vec<&'static str>),
    PetNotFound(ID),
    PetUnavailable(ID),
    PetWithoutFoundation(ID),
    DuplicatePendingRequest,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SubmitAdoptionRequestUseCase {
    type Response = AdoptionRequest;

    type Error = UseCaseError;

    const NAME: &'static str = "SubmitAdoptionRequest";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        let missing_fields = self.applicant.missing_fields();
        if !missing_fields.is_empty() {
            return Err(UseCaseError::MissingFields(missing_fields));
        }

        let pet = ctx
            .repos
            .pets
            .find(&self.pet_id)
            .await
            .ok_or_else(|| UseCaseError::PetNotFound(self.pet_id.clone()))?;
        let foundation_id = match &pet.foundation_id {
            Some(id) => id.clone(),
            None => {
                error!(
                    "Pet {} has no foundation and can not receive adoption requests",
                    pet.id
                );
                return Err(UseCaseError::PetWithoutFoundation(pet.id.clone()));
            }
        };
        if !pet.is_available() {
            return Err(UseCaseError::PetUnavailable(pet.id.clone()));
        }

        if let Some(user) = &self.user {
            let existing = ctx
                .repos
                .adoption_requests
                .find_by_user(&user.id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            let has_pending = existing
                .iter()
                .any(|r| r.pet_id == pet.id && r.status == AdoptionRequestStatus::Pending);
            if has_pending {
                return Err(UseCaseError::DuplicatePendingRequest);
            }
        }

        let request = AdoptionRequest::new(
            pet.id.clone(),
            foundation_id,
            self.user.as_ref().map(|u| u.id.clone()),
            self.applicant.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .adoption_requests
            .insert(&request)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        send_confirmation(ctx, &request, &pet).await;

        Ok(request)
    }
}

async fn send_confirmation(ctx: &PawContext, request: &AdoptionRequest, pet: &Pet) {
    let email = request_received_email(&request.applicant.full_name, &pet.name);

    match &request.user_id {
        Some(user_id) => {
            let msg = NotificationMessage {
                kind: NotificationKind::AdoptionRequestReceived,
                title: "Adoption request received".into(),
                message: format!(
                    "Your request to adopt {} was sent to the foundation. We will let you know when it is reviewed.",
                    pet.name
                ),
                adoption_request_id: Some(request.id.clone()),
                templated_email: Some(email),
            };
            if let Err(e) = notify(ctx, user_id, msg).await {
                error!(
                    "Unable to notify user {} about adoption request {}: {:?}",
                    user_id, request.id, e
                );
            }
        }
        None => {
            // Anonymous applicants are only reachable by the email of the form
            let res = ctx
                .email
                .send(&request.applicant.email, &email.subject, &email.html)
                .await;
            if !res.success {
                warn!(
                    "Unable to confirm adoption request {} to {}: {:?}",
                    request.id, request.applicant.email, res.error
                );
            }
        }
    }
}
