//! Configuration for admin authentication

use serde::{Deserialize, Serialize};

/// Password used when none is configured
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Longest session lifetime honoured, one year
const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Configuration for the admin login gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Shared admin password
    #[serde(default = "default_password")]
    pub password: String,

    /// Lifetime of an admin session in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

fn default_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

fn default_session_ttl() -> u64 {
    8 * 60 * 60
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: default_password(),
            session_ttl_secs: default_session_ttl(),
        }
    }
}

impl AdminConfig {
    /// Create a config with the given password and the default session TTL
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            session_ttl_secs: default_session_ttl(),
        }
    }

    /// Set the session lifetime
    pub fn with_session_ttl_secs(mut self, secs: u64) -> Self {
        self.session_ttl_secs = secs;
        self
    }

    /// Session lifetime as a chrono duration, capped at one year
    pub fn session_ttl(&self) -> chrono::Duration {
        let secs = self.session_ttl_secs.min(MAX_SESSION_TTL_SECS);
        chrono::Duration::seconds(secs as i64)
    }

    /// True when running with the built-in password
    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_ADMIN_PASSWORD
    }
}
