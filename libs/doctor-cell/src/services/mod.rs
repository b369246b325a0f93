pub mod approval;
pub mod directory;

pub use approval::{ApplicationOutcome, ApprovalOutcome, ApprovalWorkflow};
pub use directory::DoctorDirectory;
