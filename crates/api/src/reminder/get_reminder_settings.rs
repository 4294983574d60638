use crate::error::PawError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::get_reminder_settings::*;
use pawhome_domain::{ReminderSettings, ID};
use pawhome_infra::PawContext;

pub async fn get_reminder_settings_controller(
    http_req: HttpRequest,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetReminderSettingsUseCase { user_id: user.id };
    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(|e| match e {
            UseCaseError::StorageError => PawError::InternalError,
        })
}

/// Returns the settings of the `User`, storing the defaults on first access
#[derive(Debug)]
pub struct GetReminderSettingsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

pub(super) async fn find_or_create_settings(
    ctx: &PawContext,
    user_id: &ID,
) -> anyhow::Result<ReminderSettings> {
    if let Some(settings) = ctx.repos.reminder_settings.find(user_id).await {
        return Ok(settings);
    }
    let settings = ReminderSettings::new(user_id.clone());
    ctx.repos.reminder_settings.insert(&settings).await?;
    Ok(settings)
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderSettingsUseCase {
    type Response = ReminderSettings;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderSettings";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        find_or_create_settings(ctx, &self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
