mod inmemory;
mod postgres;

pub use inmemory::InMemoryCarnetRepo;
use pawhome_domain::{CarnetRecord, ID};
pub use postgres::PostgresCarnetRepo;

/// Read access to the medical carnets. Records are written by the
/// medical entry endpoints, `insert` only exists to seed data.
#[async_trait::async_trait]
pub trait ICarnetRepo: Send + Sync {
    async fn insert(&self, record: &CarnetRecord) -> anyhow::Result<()>;
    /// All records of the `Pet`, most recently applied first
    async fn find_by_pet(&self, pet_id: &ID) -> anyhow::Result<Vec<CarnetRecord>>;
}

#[cfg(test)]
mod tests {
    use crate::repos::tests::create_contexts;
    use chrono::NaiveDate;
    use pawhome_domain::{CareType, CarnetRecord, ID};

    #[tokio::test]
    async fn finds_pet_carnet_newest_first() {
        for ctx in create_contexts().await {
            let pet_id = ID::new();
            let date = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
            let old_bath = CarnetRecord::new(pet_id.clone(), CareType::Bath, "", date(1), None);
            let vaccine = CarnetRecord::new(
                pet_id.clone(),
                CareType::Vaccine,
                "Rabies",
                date(15),
                Some(date(30)),
            );
            let other_pet = CarnetRecord::new(ID::new(), CareType::Bath, "", date(2), None);
            for record in [&old_bath, &vaccine, &other_pet] {
                ctx.repos.carnet.insert(record).await.expect("To insert");
            }

            let carnet = ctx.repos.carnet.find_by_pet(&pet_id).await.expect("To query");
            assert_eq!(carnet.len(), 2);
            assert_eq!(carnet[0].id, vaccine.id);
            assert_eq!(carnet[0].due_on, Some(date(30)));
            assert_eq!(carnet[1].record_type, CareType::Bath);
        }
    }
}
