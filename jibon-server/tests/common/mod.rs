//! Shared test utilities for jibon-server integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use jibon_core::{
    AdminConfig, AdminSessions, AssessmentService, CsvRecordStore, Ledger, MockScoringEngine,
    ScoreResult,
};
use jibon_server::{AppState, JibonServer, ServerConfig};
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const ADMIN_PASSWORD: &str = "integration-secret";

/// A running server plus the temp dir holding its ledger
pub struct TestServer {
    pub state: Arc<AppState>,
    pub addr: SocketAddr,
    _dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Result every scripted engine call returns unless told otherwise
#[allow(dead_code)]
pub fn likely_minor() -> ScoreResult {
    ScoreResult::new(11.2, 72.0, "Likely Thalassemia Minor", "Iron Deficiency")
}

/// Creates a test server over a fresh ledger with the given engine
pub async fn create_test_server(engine: Arc<MockScoringEngine>) -> TestServer {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(CsvRecordStore::new(dir.path().join("history.csv")));
    let ledger = Arc::new(Ledger::new(store));
    let state = Arc::new(AppState::new(
        AssessmentService::new(engine, ledger),
        AdminSessions::new(AdminConfig::new(ADMIN_PASSWORD)),
    ));

    let server = JibonServer::new(ServerConfig::default(), Arc::clone(&state));
    let addr = spawn_server(server).await;

    TestServer {
        state,
        addr,
        _dir: dir,
    }
}

/// Spawns server in background task, returns bound address
async fn spawn_server(server: JibonServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run_with_listener(listener).await;
    });

    // Brief delay to ensure server is accepting connections
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    addr
}
