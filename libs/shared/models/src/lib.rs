pub mod auth;
pub mod decision;
pub mod error;
pub mod time;
