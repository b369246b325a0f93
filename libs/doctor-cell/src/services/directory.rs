use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::models::{ApprovalStatus, DoctorError, DoctorProfile};
use crate::store::DoctorStore;

/// Read side of the doctor profiles.
pub struct DoctorDirectory {
    doctors: Arc<dyn DoctorStore>,
}

impl DoctorDirectory {
    pub fn new(doctors: Arc<dyn DoctorStore>) -> Self {
        Self { doctors }
    }

    pub async fn get_doctor(&self, doctor_id: Uuid) -> Result<DoctorProfile, DoctorError> {
        debug!("Fetching doctor profile {}", doctor_id);

        self.doctors
            .get(doctor_id)
            .await?
            .ok_or(DoctorError::NotFound(doctor_id))
    }

    pub async fn list_approved(&self) -> Result<Vec<DoctorProfile>, DoctorError> {
        Ok(self.doctors.list(Some(ApprovalStatus::Accepted)).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<DoctorProfile>, DoctorError> {
        Ok(self.doctors.list(None).await?)
    }

    pub async fn profile_for_account(&self, account_id: Uuid) -> Result<DoctorProfile, DoctorError> {
        self.doctors
            .find_by_owner(account_id)
            .await?
            .ok_or(DoctorError::NoProfile)
    }
}
