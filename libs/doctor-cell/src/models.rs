use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use identity_cell::IdentityError;
use shared_database::StoreError;
use shared_models::decision::Decision;
use shared_models::error::AppError;
use shared_models::time::hh_mm;

// ==============================================================================
// DOCTOR PROFILE
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub id: Uuid,
    /// Owning account.
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub website: Option<String>,
    pub address: String,
    pub specialization: String,
    pub experience: String,
    pub consultation_fee: u32,
    #[serde(default)]
    pub status: ApprovalStatus,
    pub office_time: OfficeHours,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl DoctorProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ApprovalStatus {
    /// Pending is the only state with outgoing transitions.
    pub fn transition(self, decision: Decision) -> Result<ApprovalStatus, DoctorError> {
        match self {
            ApprovalStatus::Pending => Ok(decision.into()),
            current => Err(DoctorError::InvalidTransition { from: current, to: decision }),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }
}

impl From<Decision> for ApprovalStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accepted => ApprovalStatus::Accepted,
            Decision::Rejected => ApprovalStatus::Rejected,
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Accepted => write!(f, "accepted"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Practice hours, serialized as `["HH:MM", "HH:MM"]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfficeHours(
    #[serde(with = "hh_mm")] pub NaiveTime,
    #[serde(with = "hh_mm")] pub NaiveTime,
);

impl OfficeHours {
    pub fn start(&self) -> NaiveTime {
        self.0
    }

    pub fn end(&self) -> NaiveTime {
        self.1
    }

    /// Slots may start at the opening time but not at closing time.
    pub fn contains(&self, slot: NaiveTime) -> bool {
        slot >= self.0 && slot < self.1
    }
}

// ==============================================================================
// REQUEST / RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplyDoctorRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub address: String,
    pub specialization: String,
    pub experience: String,
    pub consultation_fee: Option<u32>,
    pub office_time: Option<OfficeHours>,
}

impl ApplyDoctorRequest {
    /// Checks required fields and formats, then builds a pending profile.
    pub fn into_profile(self, applicant_id: Uuid) -> Result<DoctorProfile, DoctorError> {
        let mut missing = Vec::new();
        for (field, value) in [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("specialization", &self.specialization),
            ("experience", &self.experience),
        ] {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }
        if self.consultation_fee.is_none() {
            missing.push("consultationFee");
        }
        if self.office_time.is_none() {
            missing.push("officeTime");
        }
        let (Some(office_time), Some(consultation_fee), true) =
            (self.office_time, self.consultation_fee, missing.is_empty())
        else {
            return Err(DoctorError::Validation(format!("missing required fields: {}", missing.join(", "))));
        };

        if !email_pattern().is_match(self.email.trim()) {
            return Err(DoctorError::Validation(format!("invalid email address: {}", self.email)));
        }
        if !phone_pattern().is_match(self.phone.trim()) {
            return Err(DoctorError::Validation(format!("invalid phone number: {}", self.phone)));
        }
        if office_time.start() >= office_time.end() {
            return Err(DoctorError::Validation("office hours must start before they end".to_string()));
        }

        Ok(DoctorProfile {
            id: Uuid::new_v4(),
            user_id: applicant_id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            website: self.website.filter(|w| !w.trim().is_empty()),
            address: self.address.trim().to_string(),
            specialization: self.specialization.trim().to_string(),
            experience: self.experience.trim().to_string(),
            consultation_fee,
            status: ApprovalStatus::Pending,
            office_time,
            created_at: Utc::now(),
        })
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
    })
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        Regex::new(r"^\+?[0-9][0-9 ().-]{5,19}$").expect("phone pattern compiles")
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAccountStatusRequest {
    pub doctor_id: Uuid,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorIdRequest {
    pub doctor_id: Uuid,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound(Uuid),

    #[error("No doctor profile for this account")]
    NoProfile,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Doctor application is already {from}; cannot change it to {to}")]
    InvalidTransition { from: ApprovalStatus, to: Decision },

    #[error("An application for this account is already pending or accepted")]
    DuplicateApplication,

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) | DoctorError::NoProfile => AppError::NotFound(err.to_string()),
            DoctorError::Validation(msg) => AppError::ValidationError(msg),
            DoctorError::InvalidTransition { .. } | DoctorError::DuplicateApplication => {
                AppError::Conflict(err.to_string())
            }
            DoctorError::Identity(e) => e.into(),
            DoctorError::Store(e) => e.into(),
        }
    }
}
