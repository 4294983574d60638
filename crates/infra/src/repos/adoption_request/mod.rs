mod inmemory;
mod postgres;

pub use inmemory::InMemoryAdoptionRequestRepo;
use pawhome_domain::{AdoptionRequest, AdoptionRequestStatus, ID};
pub use postgres::PostgresAdoptionRequestRepo;

/// All `find_by_*` queries return requests in creation order
#[async_trait::async_trait]
pub trait IAdoptionRequestRepo: Send + Sync {
    async fn insert(&self, request: &AdoptionRequest) -> anyhow::Result<()>;
    async fn save(&self, request: &AdoptionRequest) -> anyhow::Result<()>;
    async fn find(&self, request_id: &ID) -> Option<AdoptionRequest>;
    async fn delete(&self, request_id: &ID) -> Option<AdoptionRequest>;
    async fn find_by_pet(&self, pet_id: &ID) -> anyhow::Result<Vec<AdoptionRequest>>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<AdoptionRequest>>;
    async fn find_by_foundation(&self, foundation_id: &ID)
        -> anyhow::Result<Vec<AdoptionRequest>>;
    async fn find_by_status(
        &self,
        status: AdoptionRequestStatus,
    ) -> anyhow::Result<Vec<AdoptionRequest>>;
}
