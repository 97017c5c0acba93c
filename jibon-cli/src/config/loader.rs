use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use jibon_core::AdminConfig;

use super::types::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, JibonConfig, LedgerConfig, RawAdminConfig,
    RawJibonConfig, RawLedgerConfig, RawScoringConfig, RawServerConfig, ScoringConfig,
    ServerConfig,
};

/// Overrides the admin password from any config file
pub const ENV_ADMIN_PASSWORD: &str = "JIBON_ADMIN_PASSWORD";
/// Overrides the assessment history path
pub const ENV_HISTORY_PATH: &str = "JIBON_HISTORY_PATH";
/// Overrides the listen port
pub const ENV_PORT: &str = "PORT";
/// Directory holding the project config file
pub const ENV_PROJECT_CONFIG_DIR: &str = "JIBON_PROJECT_CONFIG_DIR";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project + environment)
    pub fn load() -> Result<JibonConfig> {
        let mut raw = RawJibonConfig::default();

        // Layer 1: User config
        if let Some(user_path) = Self::user_config_path()
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        // Layer 3: Environment
        let raw = Self::apply_env(raw, |key| std::env::var(key).ok())?;

        Ok(Self::finalize(raw))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "jibon").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with JIBON_PROJECT_CONFIG_DIR env var (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var(ENV_PROJECT_CONFIG_DIR) {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".jibon/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<RawJibonConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawJibonConfig, overlay: RawJibonConfig) -> RawJibonConfig {
        RawJibonConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
            },
            ledger: RawLedgerConfig {
                path: overlay.ledger.path.or(base.ledger.path),
                recording: overlay.ledger.recording.or(base.ledger.recording),
            },
            scoring: RawScoringConfig {
                program: overlay.scoring.program.or(base.scoring.program),
                args: overlay.scoring.args.or(base.scoring.args),
                working_dir: overlay.scoring.working_dir.or(base.scoring.working_dir),
                timeout_secs: overlay.scoring.timeout_secs.or(base.scoring.timeout_secs),
                metrics_args: overlay.scoring.metrics_args.or(base.scoring.metrics_args),
            },
            admin: RawAdminConfig {
                password: overlay.admin.password.or(base.admin.password),
                session_ttl_secs: overlay
                    .admin
                    .session_ttl_secs
                    .or(base.admin.session_ttl_secs),
            },
        }
    }

    /// Apply environment overrides on top of the file layers
    fn apply_env<F>(mut raw: RawJibonConfig, lookup: F) -> Result<RawJibonConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(password) = lookup(ENV_ADMIN_PASSWORD).filter(|p| !p.is_empty()) {
            raw.admin.password = Some(password);
        }

        if let Some(path) = lookup(ENV_HISTORY_PATH).filter(|p| !p.is_empty()) {
            raw.ledger.path = Some(PathBuf::from(path));
        }

        if let Some(port) = lookup(ENV_PORT).filter(|p| !p.is_empty()) {
            let port = port
                .trim()
                .parse()
                .with_context(|| format!("{} is not a valid port: {}", ENV_PORT, port))?;
            raw.server.port = Some(port);
        }

        Ok(raw)
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawJibonConfig) -> JibonConfig {
        let scoring_defaults = ScoringConfig::default();
        let admin_defaults = AdminConfig::default();

        JibonConfig {
            server: ServerConfig {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
            },
            ledger: LedgerConfig {
                path: raw.ledger.path.unwrap_or_else(jibon_paths::history_path),
                recording: raw.ledger.recording.unwrap_or_default(),
            },
            scoring: ScoringConfig {
                program: raw.scoring.program.unwrap_or(scoring_defaults.program),
                args: raw.scoring.args.unwrap_or(scoring_defaults.args),
                working_dir: raw.scoring.working_dir,
                timeout_secs: raw.scoring.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
                metrics_args: raw.scoring.metrics_args,
            },
            admin: AdminConfig {
                password: raw.admin.password.unwrap_or(admin_defaults.password),
                session_ttl_secs: raw
                    .admin
                    .session_ttl_secs
                    .unwrap_or(admin_defaults.session_ttl_secs),
            },
        }
    }

    /// Load config from a specific path (for testing)
    #[cfg(test)]
    pub fn load_from_path(path: &Path) -> Result<JibonConfig> {
        if path.exists() {
            Ok(Self::finalize(Self::read_raw(path)?))
        } else {
            Ok(JibonConfig::default())
        }
    }
}
