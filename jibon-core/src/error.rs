//! Error types for jibon-core

use thiserror::Error;

use crate::assessment::AssessmentError;
use crate::auth::AuthError;
use crate::clinical::ValidationError;
use crate::ledger::LedgerError;
use crate::scoring::ScoringError;

/// Top-level error type for jibon-core
#[derive(Error, Debug)]
pub enum JibonError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Authorization error: {0}")]
    Auth(#[from] AuthError),
}

impl From<AssessmentError> for JibonError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::Validation(e) => Self::Validation(e),
            AssessmentError::Scoring(e) => Self::Scoring(e),
            AssessmentError::Ledger(e) => Self::Ledger(e),
        }
    }
}
