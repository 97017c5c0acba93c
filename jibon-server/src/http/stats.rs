//! Dashboard statistics endpoint

use std::sync::Arc;

use axum::{Json, extract::State};
use jibon_core::StatsSummary;

use super::ApiError;
use crate::AppState;

/// GET /api/stats
pub async fn summary(State(state): State<Arc<AppState>>) -> Result<Json<StatsSummary>, ApiError> {
    Ok(Json(state.stats.aggregate().await?))
}
