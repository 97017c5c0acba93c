//! Scoring result types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ScoringError;

/// Classification returned by the scoring engine
///
/// Keys beyond the four required ones (`thalColor`, `probability`, ...) are
/// kept in `extra` and handed back to the client untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Mentzer index (MCV / RBC)
    pub mentzer: f64,
    /// Green & King index
    pub green_king: f64,
    /// Free-text thalassemia classification
    pub thalassemia: String,
    /// Free-text iron status
    pub iron: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScoreResult {
    /// Create a result with no extra keys
    pub fn new(
        mentzer: f64,
        green_king: f64,
        thalassemia: impl Into<String>,
        iron: impl Into<String>,
    ) -> Self {
        Self {
            mentzer,
            green_king,
            thalassemia: thalassemia.into(),
            iron: iron.into(),
            extra: Map::new(),
        }
    }

    /// Interpret one JSON document emitted by the engine
    ///
    /// A non-null `error` member means the engine refused the input.
    pub fn from_engine_output(value: Value) -> Result<Self, ScoringError> {
        let Value::Object(mut object) = value else {
            return Err(ScoringError::Malformed("expected a JSON object".into()));
        };

        match object.remove("error") {
            None | Some(Value::Null) => {}
            Some(Value::String(message)) => return Err(ScoringError::Rejected(message)),
            Some(other) => return Err(ScoringError::Rejected(other.to_string())),
        }

        serde_json::from_value(Value::Object(object))
            .map_err(|e| ScoringError::Malformed(e.to_string()))
    }
}
