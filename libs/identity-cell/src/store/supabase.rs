use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{StoreError, SupabaseClient};

use crate::models::{Account, NotificationRecord};
use super::AccountStore;

const ACCOUNTS: &str = "/rest/v1/accounts";

/// Accounts table over PostgREST. Queue mutations go through SQL functions so
/// each one runs as a single statement against the row.
pub struct SupabaseAccountStore {
    supabase: SupabaseClient,
}

impl SupabaseAccountStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub fn with_client(supabase: SupabaseClient) -> Self {
        Self { supabase }
    }

    async fn first(&self, path: &str) -> Result<Option<Account>, StoreError> {
        let rows: Vec<Account> = self.supabase.request(Method::GET, path, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn call(&self, function: &str, args: serde_json::Value) -> Result<Option<Account>, StoreError> {
        debug!("Calling account function {}", function);
        let rows: Vec<Account> = self.supabase.rpc(function, args).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl AccountStore for SupabaseAccountStore {
    async fn insert(&self, account: Account) -> Result<Account, StoreError> {
        let row = json!({
            "id": account.id,
            "name": account.name,
            "email": account.email,
            "credentialHash": account.credential_hash,
            "isAdmin": account.is_admin,
            "isDoctor": account.is_doctor,
            "notification": account.notification,
            "seenNotification": account.seen_notification,
            "createdAt": account.created_at,
        });

        let rows: Vec<Account> = self.supabase.write_returning(Method::POST, ACCOUNTS, row).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Backend("account insert returned no rows".to_string()))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        self.first(&format!("{}?id=eq.{}", ACCOUNTS, id)).await
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let path = format!("{}?order=createdAt.asc", ACCOUNTS);
        self.supabase.request(Method::GET, &path, None).await
    }

    async fn admins(&self) -> Result<Vec<Account>, StoreError> {
        let path = format!("{}?isAdmin=eq.true&order=createdAt.asc", ACCOUNTS);
        self.supabase.request(Method::GET, &path, None).await
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let path = format!("{}?id=eq.{}", ACCOUNTS, id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Prefer", reqwest::header::HeaderValue::from_static("return=representation"));

        let rows: Vec<Account> = self.supabase
            .request_with_headers(Method::DELETE, &path, None, Some(headers))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn append_notification(
        &self,
        id: Uuid,
        record: NotificationRecord,
    ) -> Result<Option<Account>, StoreError> {
        self.call("append_notification", json!({ "account_id": id, "record": record })).await
    }

    async fn mark_notifications_seen(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        self.call("mark_notifications_seen", json!({ "account_id": id })).await
    }

    async fn clear_notifications(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        self.call("clear_notifications", json!({ "account_id": id })).await
    }

    async fn set_doctor_standing(
        &self,
        id: Uuid,
        is_doctor: bool,
        record: NotificationRecord,
    ) -> Result<Option<Account>, StoreError> {
        self.call(
            "set_doctor_standing",
            json!({ "account_id": id, "is_doctor": is_doctor, "record": record }),
        )
        .await
    }
}
