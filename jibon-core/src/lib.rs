//! jibon-core: Clinical assessment ledger
//!
//! This crate provides the server-independent pieces of jibon:
//!
//! - **Clinical input** - [`ClinicalInput`] and its boundary validation
//! - **Scoring** - the [`ScoringEngine`] trait and [`ProcessScoringEngine`],
//!   which spawns an external classifier per request
//! - **Ledger** - [`CsvRecordStore`], [`Ledger`] for sequential id assignment
//!   and [`StatsAggregator`] for dashboard counts
//! - **Assessment** - [`AssessmentService`], which scores then records
//! - **Auth** - [`AdminSessions`], per-login admin session tokens
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use jibon_core::{
//!     AssessmentService, ClinicalInput, CsvRecordStore, Gender, Ledger, ProcessConfig,
//!     ProcessScoringEngine,
//! };
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(CsvRecordStore::new("history.csv"));
//!     let ledger = Arc::new(Ledger::new(store));
//!     let engine = Arc::new(ProcessScoringEngine::new(
//!         ProcessConfig::new("python3").arg("scripts/predict.py"),
//!     ));
//!     let service = AssessmentService::new(engine, ledger);
//!
//!     let outcome = service
//!         .assess(ClinicalInput {
//!             age: 30,
//!             gender: Gender::Female,
//!             hb: 10.2,
//!             mcv: 65.0,
//!             mch: 19.0,
//!             rdw: 16.5,
//!             rbc: 5.8,
//!             fatigue: 1,
//!             family_relation: 0,
//!             jaundice: 0,
//!             spleen: 0,
//!         })
//!         .await?;
//!     println!("recorded as {:?}", outcome.id);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//!            ┌────────────────────┐
//!            │ AssessmentService  │
//!            └───┬────────────┬───┘
//!                │            │
//!   ┌────────────▼──┐    ┌────▼─────┐     ┌─────────────────┐
//!   │ ScoringEngine │    │  Ledger  │     │ StatsAggregator │
//!   └───────────────┘    └────┬─────┘     └────────┬────────┘
//!                             │                    │
//!                        ┌────▼────────────────────▼─┐
//!                        │      CsvRecordStore       │
//!                        └───────────────────────────┘
//! ```

pub mod assessment;
pub mod auth;
pub mod clinical;
pub mod error;
pub mod ledger;
pub mod scoring;

// Re-export key types for convenience
pub use assessment::{AssessmentError, AssessmentOutcome, AssessmentService, RecordingPolicy};
pub use auth::{AdminConfig, AdminSession, AdminSessions, AuthError};
pub use clinical::{ClinicalInput, Gender, ValidationError};
pub use error::JibonError;
pub use ledger::{
    AssessmentRecord, CsvRecordStore, Ledger, LedgerError, NewAssessment, RecentLimit,
    StatsAggregator, StatsSummary,
};
pub use scoring::{
    MetricsSource, MockScoringEngine, ProcessConfig, ProcessMetricsSource, ProcessScoringEngine,
    ScoreResult, ScoringEngine, ScoringError,
};
