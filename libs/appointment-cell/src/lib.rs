pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod store;

pub use models::*;
pub use services::{AppointmentLifecycle, BookingOutcome, Scheduler, StatusOutcome};
pub use state::AppointmentState;
pub use store::{AppointmentStore, InMemoryAppointmentStore, SupabaseAppointmentStore};
