use super::IAdoptionRequestRepo;
use crate::repos::shared::inmemory_repo::*;
use pawhome_domain::{AdoptionRequest, AdoptionRequestStatus, ID};

/// Saves of requests registered with `fail_saves_for` are rejected
pub struct InMemoryAdoptionRequestRepo {
    requests: std::sync::Mutex<Vec<AdoptionRequest>>,
    failing_saves: std::sync::Mutex<Vec<ID>>,
}

impl InMemoryAdoptionRequestRepo {
    pub fn new() -> Self {
        Self {
            requests: std::sync::Mutex::new(Vec::new()),
            failing_saves: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn fail_saves_for(&self, request_id: &ID) {
        self.failing_saves
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request_id.clone());
    }

    fn find_sorted_by<F: FnMut(&AdoptionRequest) -> bool>(
        &self,
        compare: F,
    ) -> Vec<AdoptionRequest> {
        let mut requests = find_by(&self.requests, compare);
        requests.sort_by_key(|r| r.created);
        requests
    }
}

#[async_trait::async_trait]
impl IAdoptionRequestRepo for InMemoryAdoptionRequestRepo {
    async fn insert(&self, request: &AdoptionRequest) -> anyhow::Result<()> {
        insert(request, &self.requests);
        Ok(())
    }

    async fn save(&self, request: &AdoptionRequest) -> anyhow::Result<()> {
        let failing = self
            .failing_saves
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&request.id);
        if failing {
            anyhow::bail!("Unable to save adoption request {}", request.id);
        }
        save(request, &self.requests);
        Ok(())
    }

    async fn find(&self, request_id: &ID) -> Option<AdoptionRequest> {
        find(request_id, &self.requests)
    }

    async fn delete(&self, request_id: &ID) -> Option<AdoptionRequest> {
        delete(request_id, &self.requests)
    }

    async fn find_by_pet(&self, pet_id: &ID) -> anyhow::Result<Vec<AdoptionRequest>> {
        Ok(self.find_sorted_by(|r| r.pet_id == *pet_id))
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<AdoptionRequest>> {
        Ok(self.find_sorted_by(|r| r.user_id.as_ref() == Some(user_id)))
    }

    async fn find_by_foundation(
        &self,
        foundation_id: &ID,
    ) -> anyhow::Result<Vec<AdoptionRequest>> {
        Ok(self.find_sorted_by(|r| r.foundation_id == *foundation_id))
    }

    async fn find_by_status(
        &self,
        status: AdoptionRequestStatus,
    ) -> anyhow::Result<Vec<AdoptionRequest>> {
        Ok(self.find_sorted_by(|r| r.status == status))
    }
}
