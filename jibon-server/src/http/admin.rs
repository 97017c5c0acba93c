//! Admin login and logout

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use jibon_core::AuthError;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;
use crate::middleware::{ADMIN_COOKIE, extract_token};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn session_cookie(token: &str, max_age: u64) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        ADMIN_COOKIE, token, max_age
    )
}

/// POST /api/admin-login
///
/// Opens a new admin session. The token is returned in the body and set as
/// an HttpOnly cookie for browser clients.
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;

    match state.sessions.login(&request.password).await {
        Ok(session) => {
            let cookie = session_cookie(&session.token, state.sessions.ttl_secs());
            Ok((
                [(header::SET_COOKIE, cookie)],
                Json(LoginResponse {
                    success: true,
                    token: Some(session.token),
                    message: None,
                }),
            )
                .into_response())
        }
        Err(AuthError::InvalidPassword) => Ok((
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                token: None,
                message: Some("Incorrect password".to_string()),
            }),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// GET|POST /api/admin-logout
///
/// Revokes the caller's session, if any, and sends them home.
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = extract_token(&headers) {
        if state.sessions.logout(&token).await {
            tracing::info!("admin session closed");
        }
    }

    (
        [(header::SET_COOKIE, session_cookie("", 0))],
        Redirect::to("/"),
    )
}
