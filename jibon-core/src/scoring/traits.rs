//! ScoringEngine and MetricsSource traits

use async_trait::async_trait;

use super::{ScoreResult, ScoringError};
use crate::clinical::ClinicalInput;

/// Classifies one clinical submission
///
/// Implementations may call a library, a remote service or spawn a process.
/// A call blocks the requesting task until the engine answers or times out.
#[async_trait]
pub trait ScoringEngine: Send + Sync {
    /// Score the eleven clinical values
    async fn score(&self, input: &ClinicalInput) -> Result<ScoreResult, ScoringError>;
}

/// Reports evaluation metrics of the scoring model for the admin dashboard
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch the current metrics document
    async fn metrics(&self) -> Result<serde_json::Value, ScoringError>;
}
