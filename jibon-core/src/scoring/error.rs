//! Scoring engine error types

use std::time::Duration;

use thiserror::Error;

/// Errors from the external scoring engine
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("failed to run scoring engine: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("scoring engine exited unexpectedly: code {code:?}")]
    ExitStatus { code: Option<i32>, stderr: String },

    #[error("malformed scoring engine output: {0}")]
    Malformed(String),

    #[error("scoring engine timed out after {0:?}")]
    Timeout(Duration),

    /// The engine understood the request and refused it (e.g. values outside
    /// the physiologic range it was trained on)
    #[error("scoring engine rejected input: {0}")]
    Rejected(String),
}

impl ScoringError {
    /// True when the caller's input, not the engine, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
