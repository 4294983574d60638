use crate::dtos::AdoptionRequestDTO;
use pawhome_domain::{AdoptionRequest, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequestResponse {
    pub adoption_request: AdoptionRequestDTO,
}

impl AdoptionRequestResponse {
    pub fn new(request: AdoptionRequest) -> Self {
        Self {
            adoption_request: AdoptionRequestDTO::new(request),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequestsResponse {
    pub adoption_requests: Vec<AdoptionRequestDTO>,
}

impl AdoptionRequestsResponse {
    pub fn new(requests: Vec<AdoptionRequest>) -> Self {
        Self {
            adoption_requests: requests.into_iter().map(AdoptionRequestDTO::new).collect(),
        }
    }
}

pub mod submit_adoption_request {
    use super::*;
    use pawhome_domain::ApplicantDetails;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub pet_id: ID,
        #[serde(flatten)]
        pub applicant: ApplicantDetails,
    }

    pub type APIResponse = AdoptionRequestResponse;
}

pub mod get_adoption_request {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub request_id: ID,
    }

    pub type APIResponse = AdoptionRequestResponse;
}

pub mod get_my_adoption_requests {
    use super::*;

    pub type APIResponse = AdoptionRequestsResponse;
}

pub mod get_foundation_adoption_requests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub status: Option<String>,
    }

    pub type APIResponse = AdoptionRequestsResponse;
}

pub mod set_adoption_request_status {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub status: String,
        #[serde(default)]
        pub notes: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub request_id: ID,
    }

    pub type APIResponse = AdoptionRequestResponse;
}

pub mod delete_adoption_request {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub request_id: ID,
    }

    pub type APIResponse = AdoptionRequestResponse;
}
