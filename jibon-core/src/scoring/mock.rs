//! Mock scoring engine for testing
//!
//! MockScoringEngine allows scripting engine responses so the assessment
//! flow and the HTTP layer can be tested without spawning anything.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{ScoreResult, ScoringEngine, ScoringError};
use crate::clinical::ClinicalInput;

/// Scripted implementation of [`ScoringEngine`]
///
/// Queued responses are consumed one per call. When the queue is empty the
/// fallback result (if any) is returned.
#[derive(Default)]
pub struct MockScoringEngine {
    responses: Mutex<VecDeque<Result<ScoreResult, ScoringError>>>,
    fallback: Option<ScoreResult>,
    calls: Mutex<Vec<ClinicalInput>>,
}

impl MockScoringEngine {
    /// Create an engine with nothing scripted
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine that answers every call with `result`
    pub fn always(result: ScoreResult) -> Self {
        Self {
            fallback: Some(result),
            ..Self::default()
        }
    }

    /// Queue a successful response for the next call
    pub fn queue_result(&self, result: ScoreResult) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(result));
    }

    /// Queue a failure for the next call
    pub fn queue_error(&self, error: ScoringError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(error));
    }

    /// Inputs received so far, in call order
    pub fn calls(&self) -> Vec<ClinicalInput> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ScoringEngine for MockScoringEngine {
    async fn score(&self, input: &ClinicalInput) -> Result<ScoreResult, ScoringError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(input.clone());

        let queued = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match (queued, &self.fallback) {
            (Some(response), _) => response,
            (None, Some(fallback)) => Ok(fallback.clone()),
            (None, None) => Err(ScoringError::Malformed("no scripted response".into())),
        }
    }
}
