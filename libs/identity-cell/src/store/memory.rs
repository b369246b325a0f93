use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_database::StoreError;

use crate::models::{Account, NotificationRecord};
use super::AccountStore;

#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, id: Uuid, mutate: F) -> Result<Option<Account>, StoreError>
    where
        F: FnOnce(&mut Account) + Send,
    {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.get_mut(&id).map(|account| {
            mutate(account);
            account.clone()
        }))
    }

    async fn sorted<P>(&self, keep: P) -> Vec<Account>
    where
        P: Fn(&Account) -> bool,
    {
        let accounts = self.accounts.read().await;
        let mut selected: Vec<Account> = accounts.values().filter(|a| keep(a)).cloned().collect();
        selected.sort_by_key(|a| a.created_at);
        selected
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        let email_taken = accounts
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&account.email));
        if email_taken || accounts.contains_key(&account.id) {
            return Err(StoreError::Conflict(format!("account {} already exists", account.email)));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.sorted(|_| true).await)
    }

    async fn admins(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.sorted(|a| a.is_admin).await)
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.write().await.remove(&id))
    }

    async fn append_notification(
        &self,
        id: Uuid,
        record: NotificationRecord,
    ) -> Result<Option<Account>, StoreError> {
        self.update(id, move |account| account.notification.push(record)).await
    }

    async fn mark_notifications_seen(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        self.update(id, |account| {
            let unseen = std::mem::take(&mut account.notification);
            account.seen_notification.extend(unseen);
        })
        .await
    }

    async fn clear_notifications(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        self.update(id, |account| {
            account.notification.clear();
            account.seen_notification.clear();
        })
        .await
    }

    async fn set_doctor_standing(
        &self,
        id: Uuid,
        is_doctor: bool,
        record: NotificationRecord,
    ) -> Result<Option<Account>, StoreError> {
        self.update(id, move |account| {
            account.is_doctor = is_doctor;
            account.notification.push(record);
        })
        .await
    }
}
