use super::IPetRepo;
use pawhome_domain::{Pet, PetAvailability, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresPetRepo {
    pool: PgPool,
}

impl PostgresPetRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PetRaw {
    pet_uid: Uuid,
    name: String,
    species: String,
    available: bool,
    foundation_uid: Option<Uuid>,
}

impl From<PetRaw> for Pet {
    fn from(raw: PetRaw) -> Self {
        Self {
            id: raw.pet_uid.into(),
            name: raw.name,
            species: raw.species,
            availability: PetAvailability::from_available(raw.available),
            foundation_id: raw.foundation_uid.map(|id| id.into()),
        }
    }
}

#[async_trait::async_trait]
impl IPetRepo for PostgresPetRepo {
    async fn insert(&self, pet: &Pet) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pets(pet_uid, name, species, available, foundation_uid)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(pet.id.inner_ref())
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(pet.is_available())
        .bind(pet.foundation_id.as_ref().map(|id| *id.inner_ref()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, pet_id: &ID) -> Option<Pet> {
        let res = sqlx::query_as::<_, PetRaw>(
            r#"
            SELECT * FROM pets AS p
            WHERE p.pet_uid = $1
            "#,
        )
        .bind(pet_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(pet) => pet.map(|p| p.into()),
            Err(e) => {
                error!("Unable to find pet {}: {:?}", pet_id, e);
                None
            }
        }
    }

    async fn set_availability(
        &self,
        pet_id: &ID,
        availability: PetAvailability,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE pets
            SET available = $2
            WHERE pet_uid = $1
            "#,
        )
        .bind(pet_id.inner_ref())
        .bind(availability == PetAvailability::Available)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
