use super::IPetRepo;
use crate::repos::shared::inmemory_repo::*;
use pawhome_domain::{Pet, PetAvailability, ID};

pub struct InMemoryPetRepo {
    pets: std::sync::Mutex<Vec<Pet>>,
}

impl InMemoryPetRepo {
    pub fn new() -> Self {
        Self {
            pets: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPetRepo for InMemoryPetRepo {
    async fn insert(&self, pet: &Pet) -> anyhow::Result<()> {
        insert(pet, &self.pets);
        Ok(())
    }

    async fn find(&self, pet_id: &ID) -> Option<Pet> {
        find(pet_id, &self.pets)
    }

    async fn set_availability(
        &self,
        pet_id: &ID,
        availability: PetAvailability,
    ) -> anyhow::Result<()> {
        update_many(
            &self.pets,
            |pet| pet.id == *pet_id,
            |pet| pet.availability = availability,
        );
        Ok(())
    }
}
