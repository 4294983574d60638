use crate::error::PawError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::mark_reminder_read::*;
use pawhome_domain::{Reminder, ID};
use pawhome_infra::PawContext;

pub async fn mark_reminder_read_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = MarkReminderReadUseCase {
        user_id: user.id,
        reminder_id: path.reminder_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(|e| match e {
            UseCaseError::NotFound(id) => {
                PawError::NotFound(format!("A reminder with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => PawError::InternalError,
        })
}

#[derive(Debug)]
pub struct MarkReminderReadUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkReminderReadUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkReminderRead";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(r) if r.user_id == self.user_id => r,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        ctx.repos
            .reminders
            .mark_read(&reminder.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        reminder.read = true;

        Ok(reminder)
    }
}
