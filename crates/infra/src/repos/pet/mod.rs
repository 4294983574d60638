mod inmemory;
mod postgres;

pub use inmemory::InMemoryPetRepo;
use pawhome_domain::{Pet, PetAvailability, ID};
pub use postgres::PostgresPetRepo;

#[async_trait::async_trait]
pub trait IPetRepo: Send + Sync {
    async fn insert(&self, pet: &Pet) -> anyhow::Result<()>;
    async fn find(&self, pet_id: &ID) -> Option<Pet>;
    async fn set_availability(
        &self,
        pet_id: &ID,
        availability: PetAvailability,
    ) -> anyhow::Result<()>;
}
