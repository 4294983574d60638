use crate::error::PawError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::mark_all_reminders_read::*;
use pawhome_domain::ID;
use pawhome_infra::PawContext;

pub async fn mark_all_reminders_read_controller(
    http_req: HttpRequest,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = MarkAllRemindersReadUseCase { user_id: user.id };
    execute(usecase, &ctx)
        .await
        .map(|updated| HttpResponse::Ok().json(APIResponse { updated }))
        .map_err(|e| match e {
            UseCaseError::StorageError => PawError::InternalError,
        })
}

#[derive(Debug)]
pub struct MarkAllRemindersReadUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkAllRemindersReadUseCase {
    /// Number of reminders that were unread
    type Response = u64;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkAllRemindersRead";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .mark_all_read(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::get_unread_reminders::GetUnreadRemindersUseCase;
    use crate::reminder::mark_reminder_read::{self, MarkReminderReadUseCase};
    use crate::shared::test_utils::{insert_user, setup_context, today, NOW};
    use chrono::Duration;
    use pawhome_domain::{CareType, Reminder};

    fn reminder(user_id: &ID, due_in_days: i64) -> Reminder {
        Reminder {
            id: ID::default(),
            pet_id: ID::default(),
            user_id: user_id.clone(),
            reminder_type: CareType::Vaccine,
            title: "Vaccine due for Luna".into(),
            message: "Luna's Rabies vaccine is due soon.".into(),
            due_date: today() + Duration::days(due_in_days),
            days_before: due_in_days,
            read: false,
            email_sent: false,
            created: NOW,
        }
    }

    #[actix_web::test]
    async fn reads_and_marks_reminders() {
        let test = setup_context();
        let ctx = &test.ctx;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let leo = insert_user(ctx, "Leo", "leo@example.com").await;
        let later = reminder(&ana.id, 5);
        let sooner = reminder(&ana.id, 1);
        let third = reminder(&ana.id, 3);
        for r in [&later, &sooner, &third] {
            assert!(ctx.repos.reminders.insert_if_absent(r).await.unwrap());
        }

        let unread = GetUnreadRemindersUseCase {
            user_id: ana.id.clone(),
        }
        .execute(ctx)
        .await
        .unwrap();
        let due: Vec<_> = unread.iter().map(|r| r.days_before).collect();
        assert_eq!(due, vec![1, 3, 5]);

        // Reminders of other users are not found
        let res = MarkReminderReadUseCase {
            user_id: leo.id.clone(),
            reminder_id: sooner.id.clone(),
        }
        .execute(ctx)
        .await;
        assert_eq!(
            res.unwrap_err(),
            mark_reminder_read::UseCaseError::NotFound(sooner.id.clone())
        );

        let read = MarkReminderReadUseCase {
            user_id: ana.id.clone(),
            reminder_id: sooner.id.clone(),
        }
        .execute(ctx)
        .await
        .unwrap();
        assert!(read.read);

        let updated = MarkAllRemindersReadUseCase {
            user_id: ana.id.clone(),
        }
        .execute(ctx)
        .await
        .unwrap();
        assert_eq!(updated, 2);
        assert!(ctx
            .repos
            .reminders
            .find_unread_by_user(&ana.id)
            .await
            .unwrap()
            .is_empty());
    }
}
