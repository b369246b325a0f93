use std::sync::Arc;

use shared_config::AppConfig;

use crate::services::{IdentityDirectory, NotificationRelay};
use crate::store::{self, AccountStore};

#[derive(Clone)]
pub struct IdentityState {
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountStore>,
}

impl IdentityState {
    pub fn new(config: Arc<AppConfig>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { config, accounts }
    }

    pub fn from_config(config: Arc<AppConfig>) -> Self {
        let accounts = store::account_store(&config);
        Self::new(config, accounts)
    }

    pub fn directory(&self) -> IdentityDirectory {
        IdentityDirectory::new(Arc::clone(&self.accounts))
    }

    pub fn relay(&self) -> NotificationRelay {
        NotificationRelay::new(Arc::clone(&self.accounts))
    }
}
