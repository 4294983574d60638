use crate::error::PawError;
use crate::shared::{
    auth::protect_foundation_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use pawhome_api_structs::get_foundation_adoption_requests::*;
use pawhome_domain::{AdoptionRequest, AdoptionRequestStatus, ID};
use pawhome_infra::PawContext;

pub async fn get_foundation_adoption_requests_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    let member = protect_foundation_route(&http_req, &ctx).await?;

    let usecase = GetFoundationAdoptionRequestsUseCase {
        foundation_id: member.foundation_id,
        status: query.0.status,
    };
    execute(usecase, &ctx)
        .await
        .map(|requests| HttpResponse::Ok().json(APIResponse::new(requests)))
        .map_err(|e| match e {
            UseCaseError::InvalidStatus(msg) => PawError::BadClientData(msg),
            UseCaseError::StorageError => PawError::InternalError,
        })
}

#[derive(Debug)]
pub struct GetFoundationAdoptionRequestsUseCase {
    pub foundation_id: ID,
    /// Optional status filter
    pub status: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidStatus(String),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetFoundationAdoptionRequestsUseCase {
    type Response = Vec<AdoptionRequest>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetFoundationAdoptionRequests";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        let status = match &self.status {
            Some(status) => Some(
                status
                    .parse::<AdoptionRequestStatus>()
                    .map_err(|e| UseCaseError::InvalidStatus(e.to_string()))?,
            ),
            None => None,
        };

        let requests = ctx
            .repos
            .adoption_requests
            .find_by_foundation(&self.foundation_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(requests
            .into_iter()
            .filter(|r| status.map(|s| r.status == s).unwrap_or(true))
            .collect())
    }
}
