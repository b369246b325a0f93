pub mod directory;
pub mod relay;

pub use directory::IdentityDirectory;
pub use relay::NotificationRelay;
