//! Authentication error types

use thiserror::Error;

/// Errors that can occur at the admin gate
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Login attempted with the wrong password
    #[error("incorrect password")]
    InvalidPassword,

    /// No session token was provided in the request
    #[error("no session token provided")]
    MissingToken,

    /// The token is unknown, revoked or expired
    #[error("invalid or expired session")]
    InvalidSession,
}
