pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod store;

pub use models::*;
pub use services::{ApplicationOutcome, ApprovalOutcome, ApprovalWorkflow, DoctorDirectory};
pub use state::DoctorState;
pub use store::{DoctorStore, InMemoryDoctorStore, SupabaseDoctorStore};
