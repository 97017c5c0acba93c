//! Admin session middleware for axum

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jibon_core::AuthError;

use crate::AppState;
use crate::http::ApiError;

/// Cookie carrying the admin session token
pub const ADMIN_COOKIE: &str = "jibon_admin";

/// Extract the admin token from the request headers
///
/// `Authorization: Bearer` wins over the session cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    // Fall back to cookie
    let prefix = format!("{}=", ADMIN_COOKIE);
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Reject requests without a live admin session
///
/// On success the [`jibon_core::AdminSession`] is attached to the request
/// extensions.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers()).ok_or_else(|| {
        tracing::debug!("admin request without a session token");
        AuthError::MissingToken
    })?;

    let session = state.sessions.validate(&token).await.inspect_err(|e| {
        tracing::debug!("admin session rejected: {}", e);
    })?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_extract_token_from_bearer() {
        let map = headers(&[(header::AUTHORIZATION, "Bearer abc123")]);
        assert_eq!(extract_token(&map), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let map = headers(&[(header::COOKIE, "theme=dark; jibon_admin=tok; other=1")]);
        assert_eq!(extract_token(&map), Some("tok".to_string()));
    }

    #[test]
    fn test_bearer_wins_over_cookie() {
        let map = headers(&[
            (header::COOKIE, "jibon_admin=from-cookie"),
            (header::AUTHORIZATION, "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&map), Some("from-header".to_string()));
    }

    #[test]
    fn test_extract_token_missing() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        let map = headers(&[
            (header::AUTHORIZATION, "Basic Zm9vOmJhcg=="),
            (header::COOKIE, "jibon_admin="),
        ]);
        assert_eq!(extract_token(&map), None);
    }
}
