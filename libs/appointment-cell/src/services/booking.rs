use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::{ApprovalStatus, DoctorDirectory};
use identity_cell::{DeliveryReport, NotificationKind, NotificationRecord, NotificationRelay};
use shared_config::SlotReleasePolicy;
use shared_database::StoreError;

use crate::models::{Appointment, AppointmentError, BookAppointmentRequest};
use crate::store::AppointmentStore;

#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub appointment: Appointment,
    pub notification: DeliveryReport,
}

/// Slot availability, booking, and appointment listings.
pub struct Scheduler {
    appointments: Arc<dyn AppointmentStore>,
    doctors: DoctorDirectory,
    relay: NotificationRelay,
    policy: SlotReleasePolicy,
}

impl Scheduler {
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        doctors: DoctorDirectory,
        relay: NotificationRelay,
        policy: SlotReleasePolicy,
    ) -> Self {
        Self { appointments, doctors, relay, policy }
    }

    /// Advisory read; `book` performs the authoritative check.
    pub async fn check_availability(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        office_time: NaiveTime,
    ) -> Result<bool, AppointmentError> {
        let available = self.appointments
            .is_slot_free(doctor_id, date, office_time, self.policy)
            .await?;

        debug!("Slot {} {} for doctor {} available: {}",
               date, office_time.format("%H:%M"), doctor_id, available);
        Ok(available)
    }

    pub async fn book(
        &self,
        patient_id: Uuid,
        request: BookAppointmentRequest,
    ) -> Result<BookingOutcome, AppointmentError> {
        request.validate()?;

        let doctor = self.doctors.get_doctor(request.doctor_id).await?;
        if doctor.status != ApprovalStatus::Accepted {
            warn!("Booking doctor {} whose application is {}", doctor.id, doctor.status);
        }
        if !doctor.office_time.contains(request.office_time) {
            warn!("Booking {} outside office hours {}-{} of doctor {}",
                  request.office_time.format("%H:%M"),
                  doctor.office_time.start().format("%H:%M"),
                  doctor.office_time.end().format("%H:%M"),
                  doctor.id);
        }

        let patient_name = request.user_info.name.trim().to_string();
        let appointment = self.appointments
            .book_if_free(Appointment::pending(patient_id, request), self.policy)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AppointmentError::SlotUnavailable,
                other => AppointmentError::Store(other),
            })?;

        info!("Appointment {} booked with doctor {} on {} at {}",
              appointment.id, doctor.id, appointment.date, appointment.office_time.format("%H:%M"));

        let record = NotificationRecord::new(
            NotificationKind::NewAppointmentRequest,
            format!("A new appointment request from {}", patient_name),
        )
        .with_path("/doctor/appointments");

        let notification = self.relay.deliver(doctor.user_id, record).await;
        if !notification.is_delivered() {
            warn!("Appointment {} committed without notifying doctor {}", appointment.id, doctor.id);
        }

        Ok(BookingOutcome { appointment, notification })
    }

    pub async fn list_for_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.appointments.list_for_patient(patient_id).await?)
    }

    pub async fn list_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.appointments.list_for_doctor(doctor_id).await?)
    }
}
