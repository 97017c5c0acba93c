//! Model quality metrics

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::Value;

use super::ApiError;
use crate::AppState;

/// GET /api/ml-metrics (admin)
///
/// Passes the metrics command's JSON document through untouched.
pub async fn model_metrics(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let source = state
        .metrics
        .as_ref()
        .ok_or(ApiError::NotConfigured("model metrics"))?;

    Ok(Json(source.metrics().await?))
}
