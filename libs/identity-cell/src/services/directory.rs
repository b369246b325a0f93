use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Account, IdentityError, NotificationRecord};
use crate::store::AccountStore;

pub struct IdentityDirectory {
    accounts: Arc<dyn AccountStore>,
}

impl IdentityDirectory {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn get_account(&self, account_id: Uuid) -> Result<Account, IdentityError> {
        debug!("Fetching account {}", account_id);

        self.accounts
            .get(account_id)
            .await?
            .ok_or(IdentityError::NotFound(account_id))
    }

    /// Resolves the caller and checks the admin flag on the stored account.
    pub async fn require_admin(&self, account_id: Uuid) -> Result<Account, IdentityError> {
        let account = self.get_account(account_id).await?;
        if !account.is_admin {
            return Err(IdentityError::AdminRequired);
        }
        Ok(account)
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, IdentityError> {
        Ok(self.accounts.list().await?)
    }

    pub async fn admins(&self) -> Result<Vec<Account>, IdentityError> {
        Ok(self.accounts.admins().await?)
    }

    pub async fn remove_account(&self, admin_id: Uuid, account_id: Uuid) -> Result<Account, IdentityError> {
        if admin_id == account_id {
            return Err(IdentityError::SelfRemoval);
        }

        let removed = self.accounts
            .remove(account_id)
            .await?
            .ok_or(IdentityError::NotFound(account_id))?;

        info!("Account {} removed by admin {}", account_id, admin_id);
        Ok(removed)
    }

    /// Flips the doctor flag and appends `record` as one store write.
    pub async fn set_doctor_standing(
        &self,
        account_id: Uuid,
        is_doctor: bool,
        record: NotificationRecord,
    ) -> Result<Account, IdentityError> {
        let account = self.accounts
            .set_doctor_standing(account_id, is_doctor, record)
            .await?
            .ok_or(IdentityError::NotFound(account_id))?;

        info!("Account {} doctor standing set to {}", account_id, is_doctor);
        Ok(account)
    }
}
