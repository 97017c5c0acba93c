//! Process-backed scoring engine
//!
//! Spawns the configured program once per request, passes the clinical values
//! as positional arguments and reads a single JSON object from stdout.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::process::Command;

use super::{MetricsSource, ScoreResult, ScoringEngine, ScoringError};
use crate::clinical::ClinicalInput;

/// Default time a single engine invocation may take
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How to launch an external program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Program to execute (e.g. `python3`)
    pub program: String,
    /// Leading arguments placed before the per-request ones (e.g. script path)
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory for the child process
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    /// Upper bound on a single invocation
    #[serde(default = "default_timeout", with = "secs")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

impl ProcessConfig {
    /// Create a config for `program` with the default timeout
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            timeout: default_timeout(),
        }
    }

    /// Append a leading argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the invocation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the command for one invocation
    ///
    /// Extracted so argument order can be verified without spawning anything.
    pub fn build_command<I, S>(&self, trailing: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).args(trailing);

        if let Some(ref working_dir) = self.working_dir {
            cmd.current_dir(working_dir);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // Dropping the wait future on timeout must not leave the child running
        cmd.kill_on_drop(true);

        cmd
    }

    /// Run once and parse stdout as a JSON document
    async fn run_json<I, S>(&self, trailing: I) -> Result<Value, ScoringError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let child = self
            .build_command(trailing)
            .spawn()
            .map_err(ScoringError::Spawn)?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(ScoringError::Spawn)?,
            Err(_) => {
                tracing::error!(program = %self.program, timeout = ?self.timeout, "engine timed out");
                return Err(ScoringError::Timeout(self.timeout));
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !stderr.is_empty() {
            tracing::warn!(program = %self.program, "engine stderr: {}", stderr);
        }

        if !output.status.success() {
            tracing::error!(program = %self.program, code = ?output.status.code(), "engine failed");
            return Err(ScoringError::ExitStatus {
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(stdout.trim()).map_err(|e| {
            tracing::error!(program = %self.program, "unparsable engine output: {}", stdout.trim());
            ScoringError::Malformed(e.to_string())
        })
    }
}

/// Scoring engine that spawns an external program per request
pub struct ProcessScoringEngine {
    config: ProcessConfig,
}

impl ProcessScoringEngine {
    pub fn new(config: ProcessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }
}

#[async_trait]
impl ScoringEngine for ProcessScoringEngine {
    async fn score(&self, input: &ClinicalInput) -> Result<ScoreResult, ScoringError> {
        let value = self.config.run_json(input.to_args()).await?;
        ScoreResult::from_engine_output(value)
    }
}

/// Metrics source that runs an external program and returns its JSON verbatim
pub struct ProcessMetricsSource {
    config: ProcessConfig,
}

impl ProcessMetricsSource {
    pub fn new(config: ProcessConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MetricsSource for ProcessMetricsSource {
    async fn metrics(&self) -> Result<Value, ScoringError> {
        self.config.run_json(std::iter::empty::<&str>()).await
    }
}
