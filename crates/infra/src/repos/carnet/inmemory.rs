use super::ICarnetRepo;
use crate::repos::shared::inmemory_repo::*;
use pawhome_domain::{CarnetRecord, ID};
use std::cmp::Reverse;

pub struct InMemoryCarnetRepo {
    records: std::sync::Mutex<Vec<CarnetRecord>>,
}

impl InMemoryCarnetRepo {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICarnetRepo for InMemoryCarnetRepo {
    async fn insert(&self, record: &CarnetRecord) -> anyhow::Result<()> {
        insert(record, &self.records);
        Ok(())
    }

    async fn find_by_pet(&self, pet_id: &ID) -> anyhow::Result<Vec<CarnetRecord>> {
        let mut records = find_by(&self.records, |r| r.pet_id == *pet_id);
        records.sort_by_key(|r| Reverse(r.applied_on));
        Ok(records)
    }
}
