//! Request middleware

mod auth;

pub use auth::{ADMIN_COOKIE, extract_token, require_admin};
