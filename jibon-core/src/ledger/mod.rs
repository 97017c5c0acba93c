//! Append-only assessment ledger backed by a CSV file
//!
//! - [`CsvRecordStore`] owns the file layout and the read/write lock
//! - [`Ledger`] assigns sequential ids and answers recent-history queries
//! - [`StatsAggregator`] tallies classification categories over the full file

mod codec;
mod error;
mod query;
mod service;
mod stats;
mod store;
mod types;

pub use codec::{HEADER, encode_line, split_line};
pub use error::{LedgerError, MalformedRow};
pub use query::{DEFAULT_RECENT_LIMIT, RecentLimit};
pub use service::Ledger;
pub use stats::{IronClass, StatsAggregator, StatsSummary, ThalassemiaClass};
pub use store::{CsvRecordStore, StoreWriter};
pub use types::{AssessmentRecord, NewAssessment, RawRow};
