pub mod booking;
pub mod lifecycle;

pub use booking::{BookingOutcome, Scheduler};
pub use lifecycle::{AppointmentLifecycle, StatusOutcome};
