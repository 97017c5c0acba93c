//! Submission endpoint

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use jibon_core::{AssessmentOutcome, ClinicalInput};

use super::ApiError;
use crate::AppState;

/// POST /predict
///
/// The assessment service validates, scores and records the submission. The
/// response is the engine's classification plus the assigned `id`.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ClinicalInput>, JsonRejection>,
) -> Result<Json<AssessmentOutcome>, ApiError> {
    let Json(input) = body?;
    let outcome = state.assessments.assess(input).await?;
    Ok(Json(outcome))
}
