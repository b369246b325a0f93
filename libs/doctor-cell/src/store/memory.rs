use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_database::StoreError;

use crate::models::{ApprovalStatus, DoctorProfile};
use super::DoctorStore;

/// Profiles kept in insertion order.
#[derive(Default)]
pub struct InMemoryDoctorStore {
    profiles: RwLock<Vec<DoctorProfile>>,
}

impl InMemoryDoctorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DoctorStore for InMemoryDoctorStore {
    async fn insert(&self, profile: DoctorProfile) -> Result<DoctorProfile, StoreError> {
        let mut profiles = self.profiles.write().await;

        let open_application = profiles.iter().any(|existing| {
            existing.user_id == profile.user_id && existing.status != ApprovalStatus::Rejected
        });
        if open_application {
            return Err(StoreError::Conflict(format!(
                "account {} already has an open doctor profile",
                profile.user_id
            )));
        }

        profiles.push(profile.clone());
        Ok(profile)
    }

    async fn get(&self, id: Uuid) -> Result<Option<DoctorProfile>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<DoctorProfile>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().rev().find(|p| p.user_id == user_id).cloned())
    }

    async fn list(&self, status: Option<ApprovalStatus>) -> Result<Vec<DoctorProfile>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
    ) -> Result<Option<DoctorProfile>, StoreError> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles
            .iter_mut()
            .find(|p| p.id == id && p.status == from)
            .map(|profile| {
                profile.status = to;
                profile.clone()
            }))
    }
}
