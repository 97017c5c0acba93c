//! Shared application state for the jibon server

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jibon_core::{AdminSessions, AssessmentService, Ledger, MetricsSource, StatsAggregator};

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Scores and records submissions
    pub assessments: Arc<AssessmentService>,
    /// Recent-history queries
    pub ledger: Arc<Ledger>,
    /// Dashboard counts
    pub stats: Arc<StatsAggregator>,
    /// Admin sessions issued at login
    pub sessions: Arc<AdminSessions>,
    /// Model metrics, when a metrics command is configured
    pub metrics: Option<Arc<dyn MetricsSource>>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build state around an assessment service
    ///
    /// The ledger and stats aggregator share the service's record store.
    pub fn new(assessments: AssessmentService, sessions: AdminSessions) -> Self {
        let ledger = Arc::clone(assessments.ledger());
        let stats = Arc::new(StatsAggregator::new(Arc::clone(ledger.store())));

        Self {
            assessments: Arc::new(assessments),
            ledger,
            stats,
            sessions: Arc::new(sessions),
            metrics: None,
            started_at: Utc::now(),
        }
    }

    /// Enable the model metrics endpoint
    pub fn with_metrics(mut self, source: Arc<dyn MetricsSource>) -> Self {
        self.metrics = Some(source);
        self
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jibon_core::{AdminConfig, CsvRecordStore, MockScoringEngine, ScoreResult};
    use tempfile::TempDir;

    pub(crate) const TEST_PASSWORD: &str = "s3cret";

    /// State over a temp store with a scripted engine
    pub(crate) fn create_test_state(engine: Arc<MockScoringEngine>) -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(CsvRecordStore::new(dir.path().join("history.csv")));
        let ledger = Arc::new(Ledger::new(store));
        let state = AppState::new(
            AssessmentService::new(engine, ledger),
            AdminSessions::new(AdminConfig::new(TEST_PASSWORD)),
        );
        (dir, state)
    }

    pub(crate) fn likely_minor() -> ScoreResult {
        ScoreResult::new(11.2, 72.0, "Likely Thalassemia Minor", "Iron Deficiency")
    }

    #[test]
    fn test_app_state_shares_store() {
        let (_dir, state) = create_test_state(Arc::new(MockScoringEngine::always(likely_minor())));
        assert!(Arc::ptr_eq(state.assessments.ledger(), &state.ledger));
        assert!(state.metrics.is_none());
        assert!(state.uptime_seconds() >= 0);
    }
}
