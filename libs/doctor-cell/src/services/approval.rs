use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use identity_cell::{
    DeliveryReport, IdentityDirectory, IdentityError, NotificationKind, NotificationRecord, NotificationRelay,
};
use shared_database::StoreError;
use shared_models::decision::Decision;

use crate::models::{ApplyDoctorRequest, ApprovalStatus, DoctorError, DoctorProfile};
use crate::store::DoctorStore;

#[derive(Debug, Clone)]
pub struct ApplicationOutcome {
    pub profile: DoctorProfile,
    pub admins_notified: DeliveryReport,
}

#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    pub profile: DoctorProfile,
    pub notification: DeliveryReport,
}

/// Doctor applications and the admin decision on them.
pub struct ApprovalWorkflow {
    doctors: Arc<dyn DoctorStore>,
    identity: IdentityDirectory,
    relay: NotificationRelay,
}

impl ApprovalWorkflow {
    pub fn new(doctors: Arc<dyn DoctorStore>, identity: IdentityDirectory, relay: NotificationRelay) -> Self {
        Self { doctors, identity, relay }
    }

    /// Stores a pending profile for the applicant and tells every admin.
    pub async fn apply(
        &self,
        applicant_id: Uuid,
        request: ApplyDoctorRequest,
    ) -> Result<ApplicationOutcome, DoctorError> {
        self.identity.get_account(applicant_id).await?;

        let profile = request.into_profile(applicant_id)?;
        let profile = self.doctors.insert(profile).await.map_err(|e| match e {
            StoreError::Conflict(_) => DoctorError::DuplicateApplication,
            other => DoctorError::Store(other),
        })?;

        info!("Doctor application {} submitted by account {}", profile.id, applicant_id);

        let record = NotificationRecord::new(
            NotificationKind::ApplyDoctorRequest,
            format!("{} has applied for a doctor account", profile.full_name()),
        )
        .with_path("/admin/doctors")
        .with_data(json!({
            "doctorId": profile.id,
            "name": profile.full_name(),
        }));

        let admins_notified = self.relay.notify_admins(record).await;

        Ok(ApplicationOutcome { profile, admins_notified })
    }

    /// Decides a pending application and updates the owner's doctor standing.
    pub async fn change_status(&self, doctor_id: Uuid, status: &str) -> Result<ApprovalOutcome, DoctorError> {
        let decision: Decision = status.parse().map_err(DoctorError::Validation)?;

        let current = self.doctors
            .get(doctor_id)
            .await?
            .ok_or(DoctorError::NotFound(doctor_id))?;

        let next = current.status.transition(decision).inspect_err(|e| {
            warn!("Rejected approval change for doctor {}: {}", doctor_id, e);
        })?;

        let profile = match self.doctors.update_status(doctor_id, ApprovalStatus::Pending, next).await? {
            Some(profile) => profile,
            None => {
                // Decided concurrently between the read and the write.
                let from = self.doctors
                    .get(doctor_id)
                    .await?
                    .map(|p| p.status)
                    .ok_or(DoctorError::NotFound(doctor_id))?;
                return Err(DoctorError::InvalidTransition { from, to: decision });
            }
        };

        info!("Doctor {} application {}", doctor_id, profile.status);

        let record = NotificationRecord::new(
            NotificationKind::DoctorAccountRequestUpdated,
            format!("Your doctor account request has been {}", profile.status),
        )
        .with_path("/notification");

        let is_doctor = profile.status == ApprovalStatus::Accepted;
        let notification = match self.identity.set_doctor_standing(profile.user_id, is_doctor, record).await {
            Ok(_) => DeliveryReport::delivered(profile.user_id),
            Err(IdentityError::NotFound(owner)) => {
                warn!("Owner account {} of doctor {} no longer exists", owner, doctor_id);
                DeliveryReport::skipped(format!("owner account {} not found", owner))
            }
            Err(e) => {
                warn!("Doctor standing for account {} not updated: {}", profile.user_id, e);
                DeliveryReport::skipped(e.to_string())
            }
        };

        Ok(ApprovalOutcome { profile, notification })
    }
}
