use crate::error::PawError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::mark_notification_read::*;
use pawhome_domain::{Notification, ID};
use pawhome_infra::PawContext;

pub async fn mark_notification_read_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = MarkNotificationReadUseCase {
        user_id: user.id,
        notification_id: path.notification_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(|e| match e {
            UseCaseError::NotFound(id) => PawError::NotFound(format!(
                "A notification with id: {}, was not found.",
                id
            )),
            UseCaseError::StorageError => PawError::InternalError,
        })
}

#[derive(Debug)]
pub struct MarkNotificationReadUseCase {
    pub user_id: ID,
    pub notification_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkNotificationReadUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkNotificationRead";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        let mut notification = match ctx.repos.notifications.find(&self.notification_id).await {
            Some(n) if n.user_id == self.user_id => n,
            _ => return Err(UseCaseError::NotFound(self.notification_id.clone())),
        };

        ctx.repos
            .notifications
            .mark_read(&notification.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        notification.read = true;

        Ok(notification)
    }
}
