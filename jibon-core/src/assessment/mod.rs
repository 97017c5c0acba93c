//! Assessment orchestration: score a submission, then record it

mod error;
mod service;

pub use error::AssessmentError;
pub use service::{AssessmentOutcome, AssessmentService, RecordingPolicy};
