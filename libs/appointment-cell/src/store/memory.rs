use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_config::SlotReleasePolicy;
use shared_database::StoreError;

use crate::models::{Appointment, AppointmentStatus};
use super::AppointmentStore;

/// Appointments kept in insertion order behind one lock.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<P>(&self, keep: P) -> Vec<Appointment>
    where
        P: Fn(&Appointment) -> bool,
    {
        let appointments = self.appointments.read().await;
        appointments.iter().filter(|a| keep(a)).cloned().collect()
    }
}

fn slot_taken(
    appointments: &[Appointment],
    doctor_id: Uuid,
    date: NaiveDate,
    office_time: NaiveTime,
    policy: SlotReleasePolicy,
) -> bool {
    appointments
        .iter()
        .any(|a| a.occupies(doctor_id, date, office_time) && a.blocks_slot(policy))
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn book_if_free(
        &self,
        appointment: Appointment,
        policy: SlotReleasePolicy,
    ) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.write().await;

        if slot_taken(&appointments, appointment.doctor_id, appointment.date, appointment.office_time, policy) {
            return Err(StoreError::Conflict(format!(
                "doctor {} is already booked on {} at {}",
                appointment.doctor_id,
                appointment.date,
                appointment.office_time.format("%H:%M")
            )));
        }

        appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn is_slot_free(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        office_time: NaiveTime,
        policy: SlotReleasePolicy,
    ) -> Result<bool, StoreError> {
        let appointments = self.appointments.read().await;
        Ok(!slot_taken(&appointments, doctor_id, date, office_time, policy))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        let appointments = self.appointments.read().await;
        Ok(appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn list_for_patient(&self, user_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.filtered(|a| a.user_id == user_id).await)
    }

    async fn list_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.filtered(|a| a.doctor_id == doctor_id).await)
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        let mut appointments = self.appointments.write().await;
        Ok(appointments
            .iter_mut()
            .find(|a| a.id == id && a.status == from)
            .map(|appointment| {
                appointment.status = to;
                appointment.clone()
            }))
    }
}
