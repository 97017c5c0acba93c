//! JSON error responses

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jibon_core::{AssessmentError, AuthError, LedgerError, ScoringError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Errors a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Request body that could not be decoded
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Scoring(#[from] ScoringError),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("Unauthorized")]
    Unauthorized(#[from] AuthError),

    #[error("{0} not configured")]
    NotConfigured(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Scoring(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Scoring(_) => StatusCode::BAD_GATEWAY,
            Self::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
            Self::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => "VALIDATION_ERROR",
            Self::Scoring(e) if e.is_client_error() => "SCORING_REJECTED",
            Self::Scoring(_) => "SCORING_ERROR",
            Self::Ledger(LedgerError::Io { .. }) => "LEDGER_IO_ERROR",
            Self::Ledger(LedgerError::Aggregation { .. }) => "AGGREGATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotConfigured(_) => "NOT_CONFIGURED",
        }
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::Validation(e) => Self::Validation(e),
            AssessmentError::Scoring(e) => Self::Scoring(e),
            AssessmentError::Ledger(e) => Self::Ledger(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "request failed: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                code: self.code().to_string(),
            }),
        )
            .into_response()
    }
}
