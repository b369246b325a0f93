use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{Account, DeliveryReport, IdentityError, NotificationRecord};
use crate::store::AccountStore;

/// Per-account notification queues: append, mark-all-seen, clear-all.
#[derive(Clone)]
pub struct NotificationRelay {
    accounts: Arc<dyn AccountStore>,
}

impl NotificationRelay {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn append(&self, account_id: Uuid, record: NotificationRecord) -> Result<Account, IdentityError> {
        debug!("Appending {:?} notification to account {}", record.kind, account_id);

        self.accounts
            .append_notification(account_id, record)
            .await?
            .ok_or(IdentityError::NotFound(account_id))
    }

    pub async fn mark_all_seen(&self, account_id: Uuid) -> Result<Account, IdentityError> {
        let account = self.accounts
            .mark_notifications_seen(account_id)
            .await?
            .ok_or(IdentityError::NotFound(account_id))?;

        info!("Marked notifications seen for account {} ({} seen total)",
              account_id, account.seen_notification.len());
        Ok(account)
    }

    pub async fn clear_all(&self, account_id: Uuid) -> Result<Account, IdentityError> {
        let account = self.accounts
            .clear_notifications(account_id)
            .await?
            .ok_or(IdentityError::NotFound(account_id))?;

        info!("Cleared all notifications for account {}", account_id);
        Ok(account)
    }

    /// Side-effect delivery: never fails, reports what happened instead.
    pub async fn deliver(&self, account_id: Uuid, record: NotificationRecord) -> DeliveryReport {
        match self.append(account_id, record).await {
            Ok(_) => DeliveryReport::delivered(account_id),
            Err(e) => {
                warn!("Notification to account {} not delivered: {}", account_id, e);
                DeliveryReport::skipped(e.to_string())
            }
        }
    }

    /// Fans `record` out to every admin account.
    pub async fn notify_admins(&self, record: NotificationRecord) -> DeliveryReport {
        let admins = match self.accounts.admins().await {
            Ok(admins) => admins,
            Err(e) => {
                warn!("Could not enumerate admin accounts: {}", e);
                return DeliveryReport::skipped(e.to_string());
            }
        };

        if admins.is_empty() {
            warn!("No admin account to notify about {:?}", record.kind);
            return DeliveryReport::default();
        }

        let deliveries = admins
            .iter()
            .map(|admin| self.deliver(admin.id, record.clone()));

        join_all(deliveries)
            .await
            .into_iter()
            .fold(DeliveryReport::default(), DeliveryReport::merge)
    }
}
