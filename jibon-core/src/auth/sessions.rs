//! Server-side admin session store
//!
//! Each successful login gets its own random token with an expiry, so one
//! client logging out never affects another.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AdminConfig, AuthError};

/// An authenticated admin session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Opaque bearer token
    pub token: String,
    /// When the session stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Returns true if the session has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Issues, validates and revokes admin sessions
pub struct AdminSessions {
    config: AdminConfig,
    sessions: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl AdminSessions {
    pub fn new(config: AdminConfig) -> Self {
        if config.uses_default_password() {
            tracing::warn!("admin password is the built-in default; set one in config");
        }
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Session lifetime in seconds
    pub fn ttl_secs(&self) -> u64 {
        self.config.session_ttl_secs
    }

    /// Check the password and open a new session
    pub async fn login(&self, password: &str) -> Result<AdminSession, AuthError> {
        if !constant_time_eq(password.as_bytes(), self.config.password.as_bytes()) {
            tracing::debug!("admin login rejected");
            return Err(AuthError::InvalidPassword);
        }

        let now = Utc::now();
        let session = AdminSession {
            token: Uuid::new_v4().simple().to_string(),
            expires_at: now + self.config.session_ttl(),
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, expires_at| *expires_at > now);
        sessions.insert(session.token.clone(), session.expires_at);

        tracing::info!("admin session opened");
        Ok(session)
    }

    /// Look up a token; expired tokens are removed
    pub async fn validate(&self, token: &str) -> Result<AdminSession, AuthError> {
        let now = Utc::now();

        let expires_at = {
            let sessions = self.sessions.read().await;
            sessions.get(token).copied()
        };

        match expires_at {
            Some(expires_at) if now < expires_at => Ok(AdminSession {
                token: token.to_string(),
                expires_at,
            }),
            Some(_) => {
                self.sessions.write().await.remove(token);
                Err(AuthError::InvalidSession)
            }
            None => Err(AuthError::InvalidSession),
        }
    }

    /// Revoke a session; returns false if it did not exist
    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Number of sessions that have not expired yet
    pub async fn active_count(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|expires_at| **expires_at > now)
            .count()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
