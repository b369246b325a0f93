use std::sync::Arc;

use doctor_cell::{DoctorDirectory, DoctorStore};
use identity_cell::{AccountStore, IdentityDirectory, NotificationRelay};
use shared_config::AppConfig;

use crate::services::{AppointmentLifecycle, Scheduler};
use crate::store::{self, AppointmentStore};

#[derive(Clone)]
pub struct AppointmentState {
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountStore>,
    pub doctors: Arc<dyn DoctorStore>,
    pub appointments: Arc<dyn AppointmentStore>,
}

impl AppointmentState {
    pub fn new(
        config: Arc<AppConfig>,
        accounts: Arc<dyn AccountStore>,
        doctors: Arc<dyn DoctorStore>,
        appointments: Arc<dyn AppointmentStore>,
    ) -> Self {
        Self { config, accounts, doctors, appointments }
    }

    pub fn from_config(
        config: Arc<AppConfig>,
        accounts: Arc<dyn AccountStore>,
        doctors: Arc<dyn DoctorStore>,
    ) -> Self {
        let appointments = store::appointment_store(&config);
        Self::new(config, accounts, doctors, appointments)
    }

    pub fn doctor_directory(&self) -> DoctorDirectory {
        DoctorDirectory::new(Arc::clone(&self.doctors))
    }

    fn relay(&self) -> NotificationRelay {
        NotificationRelay::new(Arc::clone(&self.accounts))
    }

    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(
            Arc::clone(&self.appointments),
            self.doctor_directory(),
            self.relay(),
            self.config.slot_release_policy,
        )
    }

    pub fn lifecycle(&self) -> AppointmentLifecycle {
        AppointmentLifecycle::new(
            Arc::clone(&self.appointments),
            self.doctor_directory(),
            IdentityDirectory::new(Arc::clone(&self.accounts)),
            self.relay(),
        )
    }
}
