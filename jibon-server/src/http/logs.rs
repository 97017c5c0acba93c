//! Recent assessment history

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use jibon_core::{AssessmentRecord, Gender, RecentLimit};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;

/// Query params for the history view
#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    /// Kept as text so a bad value falls back to the default limit
    pub limit: Option<String>,
}

/// One history row as the dashboard reads it
#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub id: u64,
    pub age: i32,
    pub gender: Gender,
    pub hb: f64,
    pub mcv: f64,
    pub mch: f64,
    pub rdw: f64,
    pub rbc: f64,
    pub mentzer: f64,
    pub thal_res: String,
    pub iron_res: String,
}

impl From<AssessmentRecord> for LogEntry {
    fn from(record: AssessmentRecord) -> Self {
        let input = record.input;
        Self {
            id: record.id,
            age: input.age,
            gender: input.gender,
            hb: input.hb,
            mcv: input.mcv,
            mch: input.mch,
            rdw: input.rdw,
            rbc: input.rbc,
            mentzer: record.mentzer_index,
            thal_res: record.thalassemia_result,
            iron_res: record.iron_result,
        }
    }
}

/// GET /api/logs (admin)
///
/// Newest record first.
pub async fn recent(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<Vec<LogEntry>>, ApiError> {
    let limit = RecentLimit::parse(query.limit.as_deref());
    let records = state.ledger.recent(limit).await?;
    Ok(Json(records.into_iter().map(LogEntry::from).collect()))
}
