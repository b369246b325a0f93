pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod store;

pub use models::*;
pub use services::{IdentityDirectory, NotificationRelay};
pub use state::IdentityState;
pub use store::{AccountStore, InMemoryAccountStore, SupabaseAccountStore};
