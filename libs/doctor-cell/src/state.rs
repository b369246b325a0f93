use std::sync::Arc;

use identity_cell::{AccountStore, IdentityDirectory, NotificationRelay};
use shared_config::AppConfig;

use crate::services::{ApprovalWorkflow, DoctorDirectory};
use crate::store::{self, DoctorStore};

#[derive(Clone)]
pub struct DoctorState {
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountStore>,
    pub doctors: Arc<dyn DoctorStore>,
}

impl DoctorState {
    pub fn new(config: Arc<AppConfig>, accounts: Arc<dyn AccountStore>, doctors: Arc<dyn DoctorStore>) -> Self {
        Self { config, accounts, doctors }
    }

    pub fn from_config(config: Arc<AppConfig>, accounts: Arc<dyn AccountStore>) -> Self {
        let doctors = store::doctor_store(&config);
        Self::new(config, accounts, doctors)
    }

    pub fn identity(&self) -> IdentityDirectory {
        IdentityDirectory::new(Arc::clone(&self.accounts))
    }

    pub fn directory(&self) -> DoctorDirectory {
        DoctorDirectory::new(Arc::clone(&self.doctors))
    }

    pub fn workflow(&self) -> ApprovalWorkflow {
        ApprovalWorkflow::new(
            Arc::clone(&self.doctors),
            self.identity(),
            NotificationRelay::new(Arc::clone(&self.accounts)),
        )
    }
}
