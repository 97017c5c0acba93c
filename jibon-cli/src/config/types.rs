use std::path::PathBuf;

use jibon_core::{AdminConfig, ProcessConfig, RecordingPolicy};
use serde::{Deserialize, Serialize};

/// Default host for the jibon server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port for the jibon server
pub const DEFAULT_PORT: u16 = 3000;

/// Default scoring engine interpreter
pub const DEFAULT_SCORING_PROGRAM: &str = "python3";

/// Default scoring script, relative to the working directory
pub const DEFAULT_SCORING_SCRIPT: &str = "scripts/predict.py";

/// Default engine timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawJibonConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub ledger: RawLedgerConfig,

    #[serde(default)]
    pub scoring: RawScoringConfig,

    #[serde(default)]
    pub admin: RawAdminConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawLedgerConfig {
    pub path: Option<PathBuf>,
    pub recording: Option<RecordingPolicy>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawScoringConfig {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
    pub working_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub metrics_args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawAdminConfig {
    pub password: Option<String>,
    pub session_ttl_secs: Option<u64>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JibonConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port for the jibon server
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Assessment history file
    pub path: PathBuf,

    /// What to do when a scored assessment cannot be saved
    pub recording: RecordingPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: jibon_paths::history_path(),
            recording: RecordingPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Interpreter or binary that runs the model
    pub program: String,

    /// Leading arguments, typically the script path
    pub args: Vec<String>,

    /// Working directory for engine processes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    /// Upper bound on one engine run
    pub timeout_secs: u64,

    /// Arguments for the model metrics run; metrics are disabled when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_args: Option<Vec<String>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_SCORING_PROGRAM.to_string(),
            args: vec![DEFAULT_SCORING_SCRIPT.to_string()],
            working_dir: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            metrics_args: None,
        }
    }
}

impl ScoringConfig {
    fn process(&self, args: &[String]) -> ProcessConfig {
        let mut config = ProcessConfig::new(&self.program)
            .with_timeout(std::time::Duration::from_secs(self.timeout_secs));
        config.args = args.to_vec();
        config.working_dir = self.working_dir.clone();
        config
    }

    /// Launch config for one scoring run
    pub fn engine(&self) -> ProcessConfig {
        self.process(&self.args)
    }

    /// Launch config for the metrics run, if configured
    pub fn metrics(&self) -> Option<ProcessConfig> {
        self.metrics_args.as_deref().map(|args| self.process(args))
    }
}
