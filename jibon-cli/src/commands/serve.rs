//! jibon serve command for running the HTTP server

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use jibon_core::{
    AdminSessions, AssessmentService, CsvRecordStore, Ledger, ProcessMetricsSource,
    ProcessScoringEngine,
};
use jibon_server::{AppState, JibonServer, ServerConfig};
use tracing::info;

use crate::config::{ConfigLoader, JibonConfig};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Assessment history file
    #[arg(long)]
    pub history: Option<PathBuf>,
}

impl ServeArgs {
    /// Command-line flags win over every config layer
    fn apply(self, config: &mut JibonConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(history) = self.history {
            config.ledger.path = history;
        }
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    args.apply(&mut config);

    let state = build_state(&config);
    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port);

    info!(
        "Starting jibon server on {} (history: {})",
        server_config.addr(),
        config.ledger.path.display()
    );

    JibonServer::new(server_config, Arc::new(state))
        .run()
        .await?;
    Ok(())
}

/// Wire the ledger, scoring engine and admin sessions from config
fn build_state(config: &JibonConfig) -> AppState {
    let store = Arc::new(CsvRecordStore::new(&config.ledger.path));
    let ledger = Arc::new(Ledger::new(store));
    let engine = Arc::new(ProcessScoringEngine::new(config.scoring.engine()));
    let assessments =
        AssessmentService::new(engine, ledger).with_policy(config.ledger.recording);

    let state = AppState::new(assessments, AdminSessions::new(config.admin.clone()));

    match config.scoring.metrics() {
        Some(metrics) => state.with_metrics(Arc::new(ProcessMetricsSource::new(metrics))),
        None => state,
    }
}
