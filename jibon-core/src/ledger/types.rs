//! Ledger record types

use serde::{Deserialize, Serialize};

use crate::clinical::ClinicalInput;
use crate::scoring::ScoreResult;

/// One immutable row of the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    /// Sequential id, unique and strictly increasing
    pub id: u64,
    #[serde(flatten)]
    pub input: ClinicalInput,
    pub mentzer_index: f64,
    pub green_king_index: f64,
    pub thalassemia_result: String,
    pub iron_result: String,
}

/// An assessment waiting for its id
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssessment {
    pub input: ClinicalInput,
    pub score: ScoreResult,
}

impl NewAssessment {
    pub fn new(input: ClinicalInput, score: ScoreResult) -> Self {
        Self { input, score }
    }

    /// Attach the assigned id
    pub fn into_record(self, id: u64) -> AssessmentRecord {
        AssessmentRecord {
            id,
            input: self.input,
            mentzer_index: self.score.mentzer,
            green_king_index: self.score.green_king,
            thalassemia_result: self.score.thalassemia,
            iron_result: self.score.iron,
        }
    }
}

/// One data line of the store, split into columns but not yet decoded
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    fields: Vec<String>,
}

impl RawRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Column `index`, or `""` when the row is too short
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// The id column, if it holds a positive integer
    pub fn id(&self) -> Option<u64> {
        self.field(0).trim().parse().ok().filter(|id| *id > 0)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinical::tests::sample_input;

    #[test]
    fn test_raw_row_short_field_is_empty() {
        let row = RawRow::new(vec!["7".into(), "30".into()]);
        assert_eq!(row.field(1), "30");
        assert_eq!(row.field(15), "");
        assert_eq!(row.id(), Some(7));
    }

    #[test]
    fn test_raw_row_id_rejects_header_and_zero() {
        assert_eq!(RawRow::new(vec!["id".into()]).id(), None);
        assert_eq!(RawRow::new(vec!["0".into()]).id(), None);
        assert_eq!(RawRow::new(vec!["-3".into()]).id(), None);
    }

    #[test]
    fn test_into_record_copies_score() {
        let record = NewAssessment::new(
            sample_input(),
            ScoreResult::new(11.2, 72.0, "Likely Thalassemia Minor", "Iron Deficiency"),
        )
        .into_record(1);

        assert_eq!(record.id, 1);
        assert_eq!(record.mentzer_index, 11.2);
        assert_eq!(record.thalassemia_result, "Likely Thalassemia Minor");
    }

    #[test]
    fn test_record_serializes_flat_camel_case() {
        let record = NewAssessment::new(sample_input(), ScoreResult::new(1.0, 2.0, "Normal", "No"))
            .into_record(4);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["familyRelation"], 0);
        assert_eq!(value["greenKingIndex"], 2.0);
        assert_eq!(value["gender"], "female");
    }
}
