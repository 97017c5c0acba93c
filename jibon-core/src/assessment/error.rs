//! Assessment error types

use thiserror::Error;

use crate::clinical::ValidationError;
use crate::ledger::LedgerError;
use crate::scoring::ScoringError;

/// Why an assessment produced no usable result
#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationError),

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    /// Scoring succeeded but the result could not be recorded
    #[error("assessment could not be recorded: {0}")]
    Ledger(#[from] LedgerError),
}
