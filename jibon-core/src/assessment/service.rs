//! Assessment business logic

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::AssessmentError;
use crate::clinical::ClinicalInput;
use crate::ledger::{Ledger, NewAssessment};
use crate::scoring::{ScoreResult, ScoringEngine};

/// What to do when scoring succeeds but the ledger append fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingPolicy {
    /// Return the classification anyway, flagged as unrecorded
    #[default]
    BestEffort,
    /// Fail the whole request
    Required,
}

/// Classification handed back to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentOutcome {
    /// Ledger id, absent when the assessment was not recorded
    pub id: Option<u64>,
    #[serde(flatten)]
    pub result: ScoreResult,
    pub recorded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl AssessmentOutcome {
    fn recorded(id: u64, result: ScoreResult) -> Self {
        Self {
            id: Some(id),
            result,
            recorded: true,
            warning: None,
        }
    }

    fn unrecorded(result: ScoreResult, warning: String) -> Self {
        Self {
            id: None,
            result,
            recorded: false,
            warning: Some(warning),
        }
    }
}

/// Turns a clinical submission into a persisted, classified assessment
pub struct AssessmentService {
    engine: Arc<dyn ScoringEngine>,
    ledger: Arc<Ledger>,
    policy: RecordingPolicy,
}

impl AssessmentService {
    pub fn new(engine: Arc<dyn ScoringEngine>, ledger: Arc<Ledger>) -> Self {
        Self {
            engine,
            ledger,
            policy: RecordingPolicy::default(),
        }
    }

    /// Set the policy for failed ledger appends
    pub fn with_policy(mut self, policy: RecordingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RecordingPolicy {
        self.policy
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Validate, score and record one submission
    ///
    /// Nothing is written unless the engine returns a classification.
    pub async fn assess(&self, input: ClinicalInput) -> Result<AssessmentOutcome, AssessmentError> {
        input.validate()?;

        let result = self.engine.score(&input).await.inspect_err(|e| {
            if e.is_client_error() {
                tracing::info!("scoring engine rejected submission: {}", e);
            } else {
                tracing::error!("scoring engine failed: {}", e);
            }
        })?;

        match self
            .ledger
            .record(NewAssessment::new(input, result.clone()))
            .await
        {
            Ok(record) => Ok(AssessmentOutcome::recorded(record.id, result)),
            Err(e) if self.policy == RecordingPolicy::BestEffort => {
                tracing::warn!("returning unrecorded assessment: {}", e);
                Ok(AssessmentOutcome::unrecorded(
                    result,
                    "classification succeeded but could not be saved to history".to_string(),
                ))
            }
            Err(e) => {
                tracing::error!("failed to record assessment: {}", e);
                Err(e.into())
            }
        }
    }
}
