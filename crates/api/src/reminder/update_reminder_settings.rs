use super::get_reminder_settings::find_or_create_settings;
use crate::error::PawError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::update_reminder_settings::*;
use pawhome_domain::{ReminderSettings, ReminderSettingsUpdate, ID};
use pawhome_infra::PawContext;

pub async fn update_reminder_settings_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateReminderSettingsUseCase {
        user_id: user.id,
        update: ReminderSettingsUpdate {
            email_enabled: body.email_enabled,
            vaccine_days_before: body.vaccine_days_before,
            deworming_days_before: body.deworming_days_before,
            bath_days_before: body.bath_days_before,
            medication_days_before: body.medication_days_before,
            bath_frequency_days: body.bath_frequency_days,
        },
    };
    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(|e| match e {
            UseCaseError::InvalidFields(fields) => PawError::BadClientData(format!(
                "The following fields are out of range: {}",
                fields.join(", ")
            )),
            UseCaseError::StorageError => PawError::InternalError,
        })
}

#[derive(Debug)]
pub struct UpdateReminderSettingsUseCase {
    pub user_id: ID,
    pub update: ReminderSettingsUpdate,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidFields(Vec<&'static str>),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderSettingsUseCase {
    type Response = ReminderSettings;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminderSettings";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        let mut settings = find_or_create_settings(ctx, &self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        settings
            .update(std::mem::take(&mut self.update))
            .map_err(UseCaseError::InvalidFields)?;

        ctx.repos
            .reminder_settings
            .save(&settings)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(settings)
    }
}
