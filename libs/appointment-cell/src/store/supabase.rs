use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Method;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::{AppConfig, SlotReleasePolicy};
use shared_database::{StoreError, SupabaseClient};

use crate::models::{Appointment, AppointmentStatus};
use super::AppointmentStore;

const APPOINTMENTS: &str = "/rest/v1/appointments";

/// Appointments over PostgREST. Booking runs in the `book_appointment_slot`
/// SQL function, which takes a per-slot advisory lock before checking.
pub struct SupabaseAppointmentStore {
    supabase: SupabaseClient,
}

impl SupabaseAppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub fn with_client(supabase: SupabaseClient) -> Self {
        Self { supabase }
    }
}

#[async_trait]
impl AppointmentStore for SupabaseAppointmentStore {
    async fn book_if_free(
        &self,
        appointment: Appointment,
        policy: SlotReleasePolicy,
    ) -> Result<Appointment, StoreError> {
        let args = json!({
            "appointment": serde_json::to_value(&appointment)?,
            "release_rejected": policy.releases_rejected(),
        });

        let rows: Vec<Appointment> = self.supabase.rpc("book_appointment_slot", args).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Backend("book_appointment_slot returned no rows".to_string()))
    }

    async fn is_slot_free(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        office_time: NaiveTime,
        policy: SlotReleasePolicy,
    ) -> Result<bool, StoreError> {
        let mut path = format!(
            "{}?select=id&doctorId=eq.{}&date=eq.{}&officeTime=eq.{}",
            APPOINTMENTS,
            doctor_id,
            date,
            office_time.format("%H:%M")
        );
        if policy.releases_rejected() {
            path.push_str("&status=neq.rejected");
        }
        path.push_str("&limit=1");

        debug!("Checking slot: {}", path);
        let rows: Vec<serde_json::Value> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.is_empty())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        let path = format!("{}?id=eq.{}", APPOINTMENTS, id);
        let rows: Vec<Appointment> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_for_patient(&self, user_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        let path = format!("{}?userId=eq.{}&order=createdAt.asc", APPOINTMENTS, user_id);
        self.supabase.request(Method::GET, &path, None).await
    }

    async fn list_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        let path = format!("{}?doctorId=eq.{}&order=createdAt.asc", APPOINTMENTS, doctor_id);
        self.supabase.request(Method::GET, &path, None).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        let path = format!("{}?id=eq.{}&status=eq.{}", APPOINTMENTS, id, from);
        let rows: Vec<Appointment> = self.supabase
            .write_returning(Method::PATCH, &path, json!({ "status": to }))
            .await?;
        Ok(rows.into_iter().next())
    }
}
