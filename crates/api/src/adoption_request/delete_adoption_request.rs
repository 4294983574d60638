use super::is_visible_to;
use crate::error::PawError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::delete_adoption_request::*;
use pawhome_domain::{AdoptionRequest, User, ID};
use pawhome_infra::PawContext;

pub async fn delete_adoption_request_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteAdoptionRequestUseCase {
        user,
        request_id: path.request_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|request| HttpResponse::Ok().json(APIResponse::new(request)))
        .map_err(|e| match e {
            UseCaseError::NotFound(id) => PawError::NotFound(format!(
                "An adoption request with id: {}, was not found.",
                id
            )),
            UseCaseError::StorageError => PawError::InternalError,
        })
}

/// Hard delete by the applicant or the foundation. Nobody is notified.
#[derive(Debug)]
pub struct DeleteAdoptionRequestUseCase {
    pub user: User,
    pub request_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteAdoptionRequestUseCase {
    type Response = AdoptionRequest;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteAdoptionRequest";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.adoption_requests.find(&self.request_id).await {
            Some(r) if is_visible_to(&r, &self.user) => {
                match ctx.repos.adoption_requests.delete(&self.request_id).await {
                    Some(r) => Ok(r),
                    None => Err(UseCaseError::StorageError),
                }
            }
            _ => Err(UseCaseError::NotFound(self.request_id.clone())),
        }
    }
}
