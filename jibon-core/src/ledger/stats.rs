//! Dashboard statistics over the full ledger
//!
//! Classification works on the free-text results the scoring engine wrote.
//! Keywords are checked in a fixed priority order and the first match wins.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::codec::{COL_IRON, COL_THALASSEMIA};
use super::error::LedgerError;
use super::store::CsvRecordStore;
use super::types::RawRow;

/// Thalassemia bucket of one assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThalassemiaClass {
    Normal,
    /// Probable carrier, e.g. "Likely Thalassemia Minor"
    LikelyOrMinor,
    Positive,
}

impl ThalassemiaClass {
    /// Case-insensitive keyword match: "normal", then "likely", then
    /// "minor" or "positive". Text matching none of them is unclassified.
    pub fn classify(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if text.contains("normal") {
            Some(Self::Normal)
        } else if text.contains("likely") {
            Some(Self::LikelyOrMinor)
        } else if text.contains("minor") || text.contains("positive") {
            Some(Self::Positive)
        } else {
            None
        }
    }
}

/// Iron bucket of one assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IronClass {
    Healthy,
    Deficient,
}

impl IronClass {
    /// "no", "healthy" or "normal" anywhere in the text means healthy;
    /// everything else, empty text included, counts as deficient.
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        if ["no", "healthy", "normal"]
            .iter()
            .any(|keyword| text.contains(keyword))
        {
            Self::Healthy
        } else {
            Self::Deficient
        }
    }
}

/// Per-category counts over the ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub thal_normal: u64,
    pub thal_likely: u64,
    pub thal_positive: u64,
    pub iron_normal: u64,
    pub iron_deficient: u64,
    /// Rows that were classified
    pub total: u64,
}

impl StatsSummary {
    /// Count one row; returns false if the row was skipped as malformed
    pub fn tally(&mut self, row: &RawRow) -> bool {
        if row.id().is_none() {
            return false;
        }

        match ThalassemiaClass::classify(row.field(COL_THALASSEMIA)) {
            Some(ThalassemiaClass::Normal) => self.thal_normal += 1,
            Some(ThalassemiaClass::LikelyOrMinor) => self.thal_likely += 1,
            Some(ThalassemiaClass::Positive) => self.thal_positive += 1,
            None => {}
        }

        match IronClass::classify(row.field(COL_IRON)) {
            IronClass::Healthy => self.iron_normal += 1,
            IronClass::Deficient => self.iron_deficient += 1,
        }

        self.total += 1;
        true
    }
}

/// Full-scan aggregation over a record store
pub struct StatsAggregator {
    store: Arc<CsvRecordStore>,
}

impl StatsAggregator {
    pub fn new(store: Arc<CsvRecordStore>) -> Self {
        Self { store }
    }

    /// Count every row of the store by category
    ///
    /// A missing store gives an all-zero summary. A store that exists but
    /// cannot be read fails with [`LedgerError::Aggregation`].
    pub async fn aggregate(&self) -> Result<StatsSummary, LedgerError> {
        let mut summary = StatsSummary::default();
        let mut skipped = 0usize;

        self.store
            .for_each_row(|row| {
                if !summary.tally(&row) {
                    skipped += 1;
                }
            })
            .await
            .map_err(|e| LedgerError::Aggregation {
                path: self.store.path().to_path_buf(),
                reason: e.to_string(),
            })?;

        if skipped > 0 {
            tracing::warn!(skipped, "skipped malformed ledger rows while aggregating");
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinical::tests::sample_input;
    use crate::ledger::{Ledger, NewAssessment};
    use crate::scoring::ScoreResult;
    use tempfile::TempDir;

    fn create_test_stats() -> (TempDir, Ledger, StatsAggregator) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(CsvRecordStore::new(dir.path().join("history.csv")));
        (
            dir,
            Ledger::new(Arc::clone(&store)),
            StatsAggregator::new(store),
        )
    }

    async fn record(ledger: &Ledger, thalassemia: &str, iron: &str) {
        ledger
            .record(NewAssessment::new(
                sample_input(),
                ScoreResult::new(11.2, 72.0, thalassemia, iron),
            ))
            .await
            .unwrap();
    }

    #[test]
    fn test_thalassemia_buckets() {
        assert_eq!(
            ThalassemiaClass::classify("Likely Beta-Thalassemia"),
            Some(ThalassemiaClass::LikelyOrMinor)
        );
        assert_eq!(
            ThalassemiaClass::classify("Normal"),
            Some(ThalassemiaClass::Normal)
        );
        assert_eq!(
            ThalassemiaClass::classify("Likely Thalassemia Minor"),
            Some(ThalassemiaClass::LikelyOrMinor)
        );
        assert_eq!(
            ThalassemiaClass::classify("Thalassemia Minor"),
            Some(ThalassemiaClass::Positive)
        );
        assert_eq!(
            ThalassemiaClass::classify("POSITIVE"),
            Some(ThalassemiaClass::Positive)
        );
        assert_eq!(ThalassemiaClass::classify("Inconclusive"), None);
    }

    #[test]
    fn test_normal_wins_over_later_keywords() {
        assert_eq!(
            ThalassemiaClass::classify("Normal, unlikely minor"),
            Some(ThalassemiaClass::Normal)
        );
    }

    #[test]
    fn test_iron_buckets() {
        assert_eq!(IronClass::classify("No Deficiency"), IronClass::Healthy);
        assert_eq!(IronClass::classify("No Iron Deficiency"), IronClass::Healthy);
        assert_eq!(
            IronClass::classify("Iron Deficiency Anemia"),
            IronClass::Deficient
        );
        assert_eq!(
            IronClass::classify("Iron Deficiency Positive"),
            IronClass::Deficient
        );
        assert_eq!(IronClass::classify(""), IronClass::Deficient);
    }

    #[test]
    fn test_tally_short_row_uses_empty_fields() {
        let mut summary = StatsSummary::default();
        assert!(summary.tally(&RawRow::new(vec!["1".into(), "30".into()])));
        assert_eq!(summary.iron_deficient, 1);
        assert_eq!(summary.thal_normal + summary.thal_likely + summary.thal_positive, 0);
        assert_eq!(summary.total, 1);
    }

    #[test]
    fn test_tally_skips_row_without_id() {
        let mut summary = StatsSummary::default();
        assert!(!summary.tally(&RawRow::new(vec!["garbage".into()])));
        assert_eq!(summary, StatsSummary::default());
    }

    #[tokio::test]
    async fn test_aggregate_missing_store_is_zero() {
        let (_dir, _ledger, stats) = create_test_stats();
        assert_eq!(stats.aggregate().await.unwrap(), StatsSummary::default());
    }

    #[tokio::test]
    async fn test_aggregate_header_only_is_zero() {
        let (_dir, ledger, stats) = create_test_stats();
        tokio::fs::write(
            ledger.store().path(),
            format!("{}\n", crate::ledger::HEADER.join(",")),
        )
        .await
        .unwrap();
        assert_eq!(stats.aggregate().await.unwrap(), StatsSummary::default());
    }

    #[tokio::test]
    async fn test_aggregate_counts_and_is_idempotent() {
        let (_dir, ledger, stats) = create_test_stats();
        record(&ledger, "Normal Healthy", "No Iron Deficiency").await;
        record(&ledger, "Likely Thalassemia Minor", "Iron Deficiency").await;
        record(&ledger, "Thalassemia Minor", "Iron Deficiency Positive").await;

        let first = stats.aggregate().await.unwrap();
        assert_eq!(
            first,
            StatsSummary {
                thal_normal: 1,
                thal_likely: 1,
                thal_positive: 1,
                iron_normal: 1,
                iron_deficient: 2,
                total: 3,
            }
        );
        assert_eq!(stats.aggregate().await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_record_after_torn_line_is_kept_and_counted_once() {
        use tokio::io::AsyncWriteExt;

        let (_dir, ledger, stats) = create_test_stats();
        record(&ledger, "Normal", "No Iron Deficiency").await;

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .open(ledger.store().path())
            .await
            .unwrap();
        file.write_all(b"2,30,fem").await.unwrap();
        file.flush().await.unwrap();
        drop(file);

        record(&ledger, "Likely Thalassemia Minor", "Iron Deficiency").await;

        let ids: Vec<_> = ledger
            .recent(crate::ledger::RecentLimit::default())
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);

        assert_eq!(
            stats.aggregate().await.unwrap(),
            StatsSummary {
                thal_normal: 1,
                thal_likely: 1,
                thal_positive: 0,
                iron_normal: 1,
                iron_deficient: 1,
                total: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_aggregate_unreadable_store_is_aggregation_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        tokio::fs::write(&path, b"id,age\n1,\xff\xfe\n").await.unwrap();

        let stats = StatsAggregator::new(Arc::new(CsvRecordStore::new(path)));
        let err = stats.aggregate().await.unwrap_err();
        assert!(matches!(err, LedgerError::Aggregation { .. }));
    }

    #[test]
    fn test_summary_json_shape() {
        let value = serde_json::to_value(StatsSummary::default()).unwrap();
        for key in [
            "thalNormal",
            "thalLikely",
            "thalPositive",
            "ironNormal",
            "ironDeficient",
            "total",
        ] {
            assert_eq!(value[key], 0, "missing {key}");
        }
    }
}
