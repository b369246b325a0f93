use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use shared_config::{AppConfig, StorageBackend};
use shared_database::StoreError;

use crate::models::{Account, NotificationRecord};

pub mod memory;
pub mod supabase;

pub use memory::InMemoryAccountStore;
pub use supabase::SupabaseAccountStore;

/// Persistence seam for accounts and their embedded notification queues.
///
/// Every queue mutation is one atomic operation on one account row; callers
/// never read-modify-write the queue fields themselves. Mutations on an
/// unknown id return `Ok(None)`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert(&self, account: Account) -> Result<Account, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    /// All accounts in creation order.
    async fn list(&self) -> Result<Vec<Account>, StoreError>;

    /// Accounts with `is_admin` set, in creation order.
    async fn admins(&self) -> Result<Vec<Account>, StoreError>;

    async fn remove(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    async fn append_notification(
        &self,
        id: Uuid,
        record: NotificationRecord,
    ) -> Result<Option<Account>, StoreError>;

    /// Moves the unseen queue, in order, onto the end of the seen queue.
    async fn mark_notifications_seen(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    async fn clear_notifications(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    /// Sets `is_doctor` and appends `record` in the same write.
    async fn set_doctor_standing(
        &self,
        id: Uuid,
        is_doctor: bool,
        record: NotificationRecord,
    ) -> Result<Option<Account>, StoreError>;
}

pub fn account_store(config: &AppConfig) -> Arc<dyn AccountStore> {
    match config.storage_backend {
        StorageBackend::Memory => Arc::new(InMemoryAccountStore::new()),
        StorageBackend::Supabase => Arc::new(SupabaseAccountStore::new(config)),
    }
}
