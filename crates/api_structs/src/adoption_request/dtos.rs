use pawhome_domain::{AdoptionRequest, AdoptionRequestStatus, ApplicantDetails, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequestDTO {
    pub id: ID,
    pub pet_id: ID,
    pub foundation_id: ID,
    pub user_id: Option<ID>,
    pub applicant: ApplicantDetails,
    pub status: AdoptionRequestStatus,
    pub notes: Option<String>,
    pub created: i64,
    pub updated: i64,
}

impl AdoptionRequestDTO {
    pub fn new(request: AdoptionRequest) -> Self {
        Self {
            id: request.id,
            pet_id: request.pet_id,
            foundation_id: request.foundation_id,
            user_id: request.user_id,
            applicant: request.applicant,
            status: request.status,
            notes: request.notes,
            created: request.created,
            updated: request.updated,
        }
    }
}
