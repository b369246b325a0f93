use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use shared_config::{AppConfig, SlotReleasePolicy, StorageBackend};
use shared_database::StoreError;

use crate::models::{Appointment, AppointmentStatus};

pub mod memory;
pub mod supabase;

pub use memory::InMemoryAppointmentStore;
pub use supabase::SupabaseAppointmentStore;

/// Persistence seam for appointments.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Inserts `appointment` only if no blocking appointment holds the same
    /// (doctor, date, slot); the check and the insert are one atomic step.
    /// A taken slot fails with `StoreError::Conflict`.
    async fn book_if_free(
        &self,
        appointment: Appointment,
        policy: SlotReleasePolicy,
    ) -> Result<Appointment, StoreError>;

    async fn is_slot_free(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        office_time: NaiveTime,
        policy: SlotReleasePolicy,
    ) -> Result<bool, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;

    async fn list_for_patient(&self, user_id: Uuid) -> Result<Vec<Appointment>, StoreError>;

    async fn list_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError>;

    /// Compare-and-set on `status`; `None` when no appointment with `id` is
    /// currently in `from`.
    async fn update_status(
        &self,
        id: Uuid,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError>;
}

pub fn appointment_store(config: &AppConfig) -> Arc<dyn AppointmentStore> {
    match config.storage_backend {
        StorageBackend::Memory => Arc::new(InMemoryAppointmentStore::new()),
        StorageBackend::Supabase => Arc::new(SupabaseAppointmentStore::new(config)),
    }
}
