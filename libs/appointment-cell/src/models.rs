// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use doctor_cell::DoctorError;
use identity_cell::IdentityError;
use shared_config::SlotReleasePolicy;
use shared_database::StoreError;
use shared_models::decision::Decision;
use shared_models::error::AppError;
use shared_models::time::hh_mm;

/// Current layout of the snapshots embedded in an appointment.
pub const SNAPSHOT_VERSION: u16 = 1;

fn current_version() -> u16 {
    SNAPSHOT_VERSION
}

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    /// Patient account.
    pub user_id: Uuid,
    /// Doctor profile.
    pub doctor_id: Uuid,
    pub user_info: PatientSnapshot,
    pub doctor_info: DoctorSnapshot,
    pub date: NaiveDate,
    /// Slot start.
    #[serde(with = "hh_mm")]
    pub office_time: NaiveTime,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn pending(patient_id: Uuid, request: BookAppointmentRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: patient_id,
            doctor_id: request.doctor_id,
            user_info: request.user_info,
            doctor_info: request.doctor_info,
            date: request.date,
            office_time: hh_mm::truncate(request.office_time),
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Slots match by minute.
    pub fn occupies(&self, doctor_id: Uuid, date: NaiveDate, office_time: NaiveTime) -> bool {
        self.doctor_id == doctor_id
            && self.date == date
            && hh_mm::truncate(self.office_time) == hh_mm::truncate(office_time)
    }

    /// Whether this appointment keeps its slot unavailable under `policy`.
    pub fn blocks_slot(&self, policy: SlotReleasePolicy) -> bool {
        !(policy.releases_rejected() && self.status == AppointmentStatus::Rejected)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl AppointmentStatus {
    pub fn transition(self, decision: Decision) -> Result<AppointmentStatus, AppointmentError> {
        match (self, decision) {
            (AppointmentStatus::Pending, Decision::Accepted) => Ok(AppointmentStatus::Accepted),
            (AppointmentStatus::Pending, Decision::Rejected) => Ok(AppointmentStatus::Rejected),
            (current, decision) => Err(AppointmentError::InvalidTransition { from: current, to: decision }),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Accepted => write!(f, "accepted"),
            AppointmentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Patient details as they were when the appointment was booked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientSnapshot {
    #[serde(default = "current_version")]
    pub version: u16,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Doctor details as they were when the appointment was booked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSnapshot {
    #[serde(default = "current_version")]
    pub version: u16,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<u32>,
}

// ==============================================================================
// REQUEST / RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub office_time: NaiveTime,
    pub user_info: PatientSnapshot,
    pub doctor_info: DoctorSnapshot,
}

impl BookAppointmentRequest {
    pub fn validate(&self) -> Result<(), AppointmentError> {
        if self.user_info.name.trim().is_empty() {
            return Err(AppointmentError::Validation("userInfo.name is required".to_string()));
        }
        if self.doctor_info.first_name.trim().is_empty() || self.doctor_info.last_name.trim().is_empty() {
            return Err(AppointmentError::Validation("doctorInfo name is required".to_string()));
        }
        if self.user_info.version > SNAPSHOT_VERSION || self.doctor_info.version > SNAPSHOT_VERSION {
            return Err(AppointmentError::Validation(format!(
                "unsupported snapshot version (current is {})",
                SNAPSHOT_VERSION
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub office_time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub appointment_id: Uuid,
    pub status: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound(Uuid),

    #[error("Appointment slot not available")]
    SlotUnavailable,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Appointment is already {from}; cannot change it to {to}")]
    InvalidTransition { from: AppointmentStatus, to: Decision },

    #[error("Only the appointment's doctor or an administrator can do this")]
    Forbidden,

    #[error(transparent)]
    Doctor(#[from] DoctorError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound(_) => AppError::NotFound(err.to_string()),
            AppointmentError::SlotUnavailable | AppointmentError::InvalidTransition { .. } => {
                AppError::Conflict(err.to_string())
            }
            AppointmentError::Validation(msg) => AppError::ValidationError(msg),
            AppointmentError::Forbidden => AppError::Forbidden(err.to_string()),
            AppointmentError::Doctor(e) => e.into(),
            AppointmentError::Identity(e) => e.into(),
            AppointmentError::Store(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn request() -> BookAppointmentRequest {
        serde_json::from_value(json!({
            "doctorId": Uuid::new_v4(),
            "date": "2024-01-10",
            "officeTime": "10:00",
            "userInfo": { "name": "Pat Patient" },
            "doctorInfo": { "firstName": "Grace", "lastName": "Hopper", "specialization": "Cardiology" }
        }))
        .unwrap()
    }

    #[test]
    fn snapshots_default_to_current_version() {
        let request = request();
        assert_eq!(request.user_info.version, SNAPSHOT_VERSION);
        assert_eq!(request.doctor_info.version, SNAPSHOT_VERSION);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_blank_patient_name_and_future_versions() {
        let mut blank = request();
        blank.user_info.name = "  ".into();
        assert_matches!(blank.validate(), Err(AppointmentError::Validation(_)));

        let mut newer = request();
        newer.doctor_info.version = SNAPSHOT_VERSION + 1;
        assert_matches!(newer.validate(), Err(AppointmentError::Validation(_)));
    }

    #[test]
    fn appointment_wire_format() {
        let appointment = Appointment::pending(Uuid::new_v4(), request());
        let json = serde_json::to_value(&appointment).unwrap();

        assert_eq!(json["date"], "2024-01-10");
        assert_eq!(json["officeTime"], "10:00");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["userInfo"]["version"], 1);
        assert!(json["userInfo"].get("email").is_none());
    }

    #[test]
    fn status_machine_is_one_step() {
        assert_eq!(AppointmentStatus::Pending.transition(Decision::Rejected).unwrap(), AppointmentStatus::Rejected);
        assert_matches!(
            AppointmentStatus::Rejected.transition(Decision::Accepted),
            Err(AppointmentError::InvalidTransition { from: AppointmentStatus::Rejected, .. })
        );
    }

    #[test]
    fn rejected_appointments_block_only_under_never() {
        let mut appointment = Appointment::pending(Uuid::new_v4(), request());
        appointment.status = AppointmentStatus::Rejected;

        assert!(appointment.blocks_slot(SlotReleasePolicy::Never));
        assert!(!appointment.blocks_slot(SlotReleasePolicy::OnRejection));
    }
}
