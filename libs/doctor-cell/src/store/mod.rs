use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use shared_config::{AppConfig, StorageBackend};
use shared_database::StoreError;

use crate::models::{ApprovalStatus, DoctorProfile};

pub mod memory;
pub mod supabase;

pub use memory::InMemoryDoctorStore;
pub use supabase::SupabaseDoctorStore;

/// Persistence seam for doctor profiles.
#[async_trait]
pub trait DoctorStore: Send + Sync {
    /// Fails with `Conflict` when the owner already holds a pending or
    /// accepted profile.
    async fn insert(&self, profile: DoctorProfile) -> Result<DoctorProfile, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<DoctorProfile>, StoreError>;

    /// Most recent profile owned by `user_id`.
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<DoctorProfile>, StoreError>;

    /// Profiles in insertion order, optionally filtered by status.
    async fn list(&self, status: Option<ApprovalStatus>) -> Result<Vec<DoctorProfile>, StoreError>;

    /// Compare-and-set on `status`. Returns `None` when no profile with `id`
    /// currently has status `from`.
    async fn update_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
    ) -> Result<Option<DoctorProfile>, StoreError>;
}

pub fn doctor_store(config: &AppConfig) -> Arc<dyn DoctorStore> {
    match config.storage_backend {
        StorageBackend::Memory => Arc::new(InMemoryDoctorStore::new()),
        StorageBackend::Supabase => Arc::new(SupabaseDoctorStore::new(config)),
    }
}
