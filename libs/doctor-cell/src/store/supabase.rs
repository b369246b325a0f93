use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{StoreError, SupabaseClient};

use crate::models::{ApprovalStatus, DoctorProfile};
use super::DoctorStore;

const DOCTORS: &str = "/rest/v1/doctors";

/// Doctor profiles over PostgREST. A partial unique index on
/// `("userId") where status <> 'rejected'` backs the one-open-profile rule.
pub struct SupabaseDoctorStore {
    supabase: SupabaseClient,
}

impl SupabaseDoctorStore {
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
impl DoctorStore for SupabaseDoctorStore {
    async fn insert(&self, profile: DoctorProfile) -> Result<DoctorProfile, StoreError> {
        let row = serde_json::to_value(&profile)?;
        let rows: Vec<DoctorProfile> = self.supabase.write_returning(Method::POST, DOCTORS, row).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Backend("doctor insert returned no rows".to_string()))
    }

    async fn get(&self, id: Uuid) -> Result<Option<DoctorProfile>, StoreError> {
        let path = format!("{}?id=eq.{}", DOCTORS, id);
        let rows: Vec<DoctorProfile> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<DoctorProfile>, StoreError> {
        let path = format!("{}?userId=eq.{}&order=createdAt.desc&limit=1", DOCTORS, user_id);
        let rows: Vec<DoctorProfile> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn list(&self, status: Option<ApprovalStatus>) -> Result<Vec<DoctorProfile>, StoreError> {
        let path = match status {
            Some(status) => format!("{}?status=eq.{}&order=createdAt.asc", DOCTORS, status),
            None => format!("{}?order=createdAt.asc", DOCTORS),
        };
        debug!("Listing doctors: {}", path);
        self.supabase.request(Method::GET, &path, None).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
    ) -> Result<Option<DoctorProfile>, StoreError> {
        let path = format!("{}?id=eq.{}&status=eq.{}", DOCTORS, id, from);
        let rows: Vec<DoctorProfile> = self.supabase
            .write_returning(Method::PATCH, &path, json!({ "status": to }))
            .await?;
        Ok(rows.into_iter().next())
    }
}
