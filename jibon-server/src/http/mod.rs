//! HTTP server module

mod admin;
mod api;
mod assessment;
mod error;
mod logs;
mod metrics;
mod stats;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::middleware::require_admin;

pub use admin::{LoginRequest, LoginResponse};
pub use api::HealthResponse;
pub use error::{ApiError, ErrorResponse};
pub use logs::LogsQuery;

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/api/logs", get(logs::recent))
        .route("/api/ml-metrics", get(metrics::model_metrics))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_admin,
        ));

    Router::new()
        .route("/predict", post(assessment::predict))
        .route("/api/stats", get(stats::summary))
        .route("/api/health", get(api::health))
        .route("/api/admin-login", post(admin::login))
        .route("/api/admin-logout", get(admin::logout).post(admin::logout))
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
