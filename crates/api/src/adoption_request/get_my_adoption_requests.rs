use crate::error::PawError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::get_my_adoption_requests::*;
use pawhome_domain::{AdoptionRequest, ID};
use pawhome_infra::PawContext;

pub async fn get_my_adoption_requests_controller(
    http_req: HttpRequest,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetMyAdoptionRequestsUseCase { user_id: user.id };
    execute(usecase, &ctx)
        .await
        .map(|requests| HttpResponse::Ok().json(APIResponse::new(requests)))
        .map_err(|e| match e {
            UseCaseError::StorageError => PawError::InternalError,
        })
}

#[derive(Debug)]
pub struct GetMyAdoptionRequestsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMyAdoptionRequestsUseCase {
    type Response = Vec<AdoptionRequest>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMyAdoptionRequests";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .adoption_requests
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
