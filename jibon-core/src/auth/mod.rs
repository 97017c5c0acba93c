//! Admin authentication with server-side session tokens

mod config;
mod error;
mod sessions;

pub use config::{AdminConfig, DEFAULT_ADMIN_PASSWORD};
pub use error::AuthError;
pub use sessions::{AdminSession, AdminSessions};
