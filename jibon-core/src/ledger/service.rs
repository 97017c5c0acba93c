//! Sequential id assignment and recent-history queries

use std::collections::VecDeque;
use std::sync::Arc;

use super::error::LedgerError;
use super::query::RecentLimit;
use super::store::CsvRecordStore;
use super::types::{AssessmentRecord, NewAssessment};

/// The ordered, append-only history of assessments
pub struct Ledger {
    store: Arc<CsvRecordStore>,
}

impl Ledger {
    pub fn new(store: Arc<CsvRecordStore>) -> Self {
        Self { store }
    }

    /// The backing store
    pub fn store(&self) -> &Arc<CsvRecordStore> {
        &self.store
    }

    /// Assign the next id and append the assessment
    ///
    /// The id scan and the append happen under one exclusive store lock, so
    /// concurrent callers always receive distinct, increasing ids. The next id
    /// is one past the largest id on file, or 1 for an empty store.
    pub async fn record(&self, assessment: NewAssessment) -> Result<AssessmentRecord, LedgerError> {
        let writer = self.store.writer().await;

        let mut last_id = 0;
        writer
            .for_each_row(|row| {
                if let Some(id) = row.id() {
                    last_id = last_id.max(id);
                }
            })
            .await?;

        let record = assessment.into_record(last_id + 1);
        writer.append(&record).await?;

        tracing::info!(id = record.id, "assessment recorded");
        Ok(record)
    }

    /// The id the next recorded assessment would receive
    pub async fn next_id(&self) -> Result<u64, LedgerError> {
        let mut last_id = 0;
        self.store
            .for_each_row(|row| {
                if let Some(id) = row.id() {
                    last_id = last_id.max(id);
                }
            })
            .await?;
        Ok(last_id + 1)
    }

    /// Up to `limit` of the newest records, newest first
    ///
    /// Rows that cannot be decoded are skipped.
    pub async fn recent(&self, limit: RecentLimit) -> Result<Vec<AssessmentRecord>, LedgerError> {
        let limit = limit.get();
        let mut window = VecDeque::with_capacity(limit.min(1024));
        let mut skipped = 0usize;

        self.store
            .for_each_row(|row| match AssessmentRecord::try_from(&row) {
                Ok(record) => {
                    if window.len() == limit {
                        window.pop_front();
                    }
                    window.push_back(record);
                }
                Err(e) => {
                    tracing::debug!("skipping ledger row: {}", e);
                    skipped += 1;
                }
            })
            .await?;

        if skipped > 0 {
            tracing::warn!(skipped, "skipped malformed ledger rows");
        }

        Ok(window.into_iter().rev().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::clinical::tests::sample_input;
    use crate::scoring::ScoreResult;
    use tempfile::TempDir;

    fn create_test_ledger() -> (TempDir, Ledger) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(CsvRecordStore::new(dir.path().join("history.csv")));
        (dir, Ledger::new(store))
    }

    fn assessment(thalassemia: &str) -> NewAssessment {
        NewAssessment::new(
            sample_input(),
            ScoreResult::new(11.2, 72.0, thalassemia, "Iron Deficiency"),
        )
    }

    #[tokio::test]
    async fn test_first_id_is_one() {
        let (_dir, ledger) = create_test_ledger();
        assert_eq!(ledger.next_id().await.unwrap(), 1);
        let record = ledger.record(assessment("Normal")).await.unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(ledger.next_id().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_header_only_store_starts_at_one() {
        let (_dir, ledger) = create_test_ledger();
        tokio::fs::write(
            ledger.store().path(),
            format!("{}\n", crate::ledger::HEADER.join(",")),
        )
        .await
        .unwrap();

        let record = ledger.record(assessment("Normal")).await.unwrap();
        assert_eq!(record.id, 1);
        assert!(ledger.recent(RecentLimit::default()).await.unwrap().len() == 1);
    }

    #[tokio::test]
    async fn test_ids_continue_past_gaps() {
        let (_dir, ledger) = create_test_ledger();
        let store = ledger.store();
        store
            .append(&assessment("Normal").into_record(7))
            .await
            .unwrap();
        store
            .append(&assessment("Normal").into_record(3))
            .await
            .unwrap();

        let record = ledger.record(assessment("Normal")).await.unwrap();
        assert_eq!(record.id, 8);
    }

    #[tokio::test]
    async fn test_concurrent_records_get_distinct_sequential_ids() {
        let (_dir, ledger) = create_test_ledger();
        let ledger = Arc::new(ledger);
        let n = 40;

        let handles: Vec<_> = (0..n)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.record(assessment("Normal")).await.unwrap().id })
            })
            .collect();

        let mut ids = BTreeSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap()), "duplicate id");
        }

        let expected: BTreeSet<u64> = (1..=n).collect();
        assert_eq!(ids, expected);
        assert_eq!(ledger.store().read_all().await.unwrap().len(), n as usize);
    }

    #[tokio::test]
    async fn test_recent_on_empty_store() {
        let (_dir, ledger) = create_test_ledger();
        assert!(ledger.recent(RecentLimit::new(5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_newest_first_and_limited() {
        let (_dir, ledger) = create_test_ledger();
        for _ in 0..5 {
            ledger.record(assessment("Normal")).await.unwrap();
        }

        let recent = ledger.recent(RecentLimit::new(3)).await.unwrap();
        let ids: Vec<_> = recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }

    #[tokio::test]
    async fn test_round_trip_through_recent() {
        let (_dir, ledger) = create_test_ledger();
        let written = ledger
            .record(assessment("Likely Thalassemia Minor"))
            .await
            .unwrap();

        let read = ledger.recent(RecentLimit::new(1)).await.unwrap();
        assert_eq!(read, vec![written]);
    }

    #[tokio::test]
    async fn test_recent_skips_malformed_rows() {
        let (_dir, ledger) = create_test_ledger();
        ledger.record(assessment("Normal")).await.unwrap();
        let mut contents = tokio::fs::read_to_string(ledger.store().path())
            .await
            .unwrap();
        contents.push_str("2,not,a,record\n");
        tokio::fs::write(ledger.store().path(), contents)
            .await
            .unwrap();

        let recent = ledger.recent(RecentLimit::default()).await.unwrap();
        assert_eq!(recent.len(), 1);
        // The malformed row still reserves its id
        assert_eq!(ledger.next_id().await.unwrap(), 3);
    }
}
