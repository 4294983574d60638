use crate::error::PawError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::get_unread_reminders::*;
use pawhome_domain::{Reminder, ID};
use pawhome_infra::PawContext;

pub async fn get_unread_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetUnreadRemindersUseCase { user_id: user.id };
    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(|e| match e {
            UseCaseError::StorageError => PawError::InternalError,
        })
}

#[derive(Debug)]
pub struct GetUnreadRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUnreadRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUnreadReminders";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find_unread_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
