// libs/identity-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use shared_database::StoreError;
use shared_models::error::AppError;

// ==============================================================================
// ACCOUNT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Issued and checked by the auth provider; never echoed to clients.
    #[serde(default, skip_serializing)]
    pub credential_hash: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_doctor: bool,
    /// Unseen notifications, oldest first.
    #[serde(default)]
    pub notification: Vec<NotificationRecord>,
    /// Seen notifications, oldest first.
    #[serde(default)]
    pub seen_notification: Vec<NotificationRecord>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: impl Into<String>, email: impl Into<String>, credential_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            credential_hash: credential_hash.into(),
            is_admin: false,
            is_doctor: false,
            notification: Vec::new(),
            seen_notification: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }
}

// ==============================================================================
// NOTIFICATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    NewAppointmentRequest,
    StatusUpdated,
    ApplyDoctorRequest,
    DoctorAccountRequestUpdated,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_click_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl NotificationRecord {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            on_click_path: None,
            data: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.on_click_path = Some(path.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Outcome of a notification side effect attached to a primary mutation.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    pub delivered_to: Vec<Uuid>,
    pub skipped: Vec<String>,
}

impl DeliveryReport {
    pub fn delivered(account_id: Uuid) -> Self {
        Self {
            delivered_to: vec![account_id],
            skipped: Vec::new(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            delivered_to: Vec::new(),
            skipped: vec![reason.into()],
        }
    }

    pub fn is_delivered(&self) -> bool {
        !self.delivered_to.is_empty()
    }

    pub fn merge(mut self, other: DeliveryReport) -> Self {
        self.delivered_to.extend(other.delivered_to);
        self.skipped.extend(other.skipped);
        self
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveUserRequest {
    pub user_id: Uuid,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    #[error("Administrator privileges required")]
    AdminRequired,

    #[error("Administrators cannot remove their own account")]
    SelfRemoval,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotFound(_) => AppError::NotFound("User not found".to_string()),
            IdentityError::AdminRequired => AppError::Forbidden(err.to_string()),
            IdentityError::SelfRemoval => AppError::BadRequest(err.to_string()),
            IdentityError::Store(e) => e.into(),
        }
    }
}
