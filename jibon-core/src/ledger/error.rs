//! Ledger error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("failed to {op} ledger {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot aggregate ledger {}: {reason}", path.display())]
    Aggregation { path: PathBuf, reason: String },
}

impl LedgerError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// A data line that could not be decoded into a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed row: column {column} has value {value:?}")]
pub struct MalformedRow {
    pub column: &'static str,
    pub value: String,
}
