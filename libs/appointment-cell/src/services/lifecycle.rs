use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use doctor_cell::{DoctorDirectory, DoctorError};
use identity_cell::{DeliveryReport, IdentityDirectory, NotificationKind, NotificationRecord, NotificationRelay};
use shared_models::decision::Decision;

use crate::models::{Appointment, AppointmentError, AppointmentStatus};
use crate::store::AppointmentStore;

#[derive(Debug, Clone)]
pub struct StatusOutcome {
    pub appointment: Appointment,
    pub notification: DeliveryReport,
}

/// Doctor decisions on pending appointments.
pub struct AppointmentLifecycle {
    appointments: Arc<dyn AppointmentStore>,
    doctors: DoctorDirectory,
    identity: IdentityDirectory,
    relay: NotificationRelay,
}

impl AppointmentLifecycle {
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        doctors: DoctorDirectory,
        identity: IdentityDirectory,
        relay: NotificationRelay,
    ) -> Self {
        Self { appointments, doctors, identity, relay }
    }

    pub async fn get(&self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        self.appointments
            .get(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound(appointment_id))
    }

    /// The appointment's doctor and administrators may decide on it.
    pub async fn authorize_decision(&self, caller_id: Uuid, appointment_id: Uuid) -> Result<(), AppointmentError> {
        let appointment = self.get(appointment_id).await?;

        match self.doctors.get_doctor(appointment.doctor_id).await {
            Ok(doctor) if doctor.user_id == caller_id => return Ok(()),
            Ok(_) | Err(DoctorError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        if self.identity.get_account(caller_id).await?.is_admin {
            return Ok(());
        }

        warn!("Account {} may not decide appointment {}", caller_id, appointment_id);
        Err(AppointmentError::Forbidden)
    }

    pub async fn update_status(&self, appointment_id: Uuid, status: &str) -> Result<StatusOutcome, AppointmentError> {
        let decision: Decision = status.parse().map_err(AppointmentError::Validation)?;

        let current = self.get(appointment_id).await?;
        let next = current.status.transition(decision).inspect_err(|e| {
            warn!("Rejected status change for appointment {}: {}", appointment_id, e);
        })?;

        let appointment = match self.appointments
            .update_status(appointment_id, AppointmentStatus::Pending, next)
            .await?
        {
            Some(appointment) => appointment,
            None => {
                let from = self.get(appointment_id).await?.status;
                return Err(AppointmentError::InvalidTransition { from, to: decision });
            }
        };

        info!("Appointment {} {}", appointment.id, appointment.status);

        let record = NotificationRecord::new(
            NotificationKind::StatusUpdated,
            format!("Your appointment has been {}", appointment.status),
        )
        .with_path("/user/appointments");

        let notification = self.relay.deliver(appointment.user_id, record).await;

        Ok(StatusOutcome { appointment, notification })
    }
}
