//! Scoring engine abstraction
//!
//! The ledger never classifies anything itself. A [`ScoringEngine`] turns a
//! [`ClinicalInput`](crate::ClinicalInput) into a [`ScoreResult`]; the
//! production implementation spawns an external program per request.

mod error;
pub mod mock;
pub mod process;
mod traits;
mod types;

pub use error::ScoringError;
pub use mock::MockScoringEngine;
pub use process::{ProcessConfig, ProcessMetricsSource, ProcessScoringEngine};
pub use traits::{MetricsSource, ScoringEngine};
pub use types::ScoreResult;
