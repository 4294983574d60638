use super::is_visible_to;
use crate::error::PawError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::get_adoption_request::*;
use pawhome_domain::{AdoptionRequest, User, ID};
use pawhome_infra::PawContext;

pub async fn get_adoption_request_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetAdoptionRequestUseCase {
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
        })
}

#[derive(Debug)]
pub struct GetAdoptionRequestUseCase {
    pub user: User,
    pub request_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAdoptionRequestUseCase {
    type Response = AdoptionRequest;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAdoptionRequest";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.adoption_requests.find(&self.request_id).await {
            Some(r) if is_visible_to(&r, &self.user) => Ok(r),
            _ => Err(UseCaseError::NotFound(self.request_id.clone())),
        }
    }
}
