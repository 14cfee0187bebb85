use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::colname::ColumnNameError;
use crate::domain::entities::cell::{CellCoord, CellTriple, CommitOutcome, VersionedRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be opened or read. Fatal to `open`.
    Unavailable(String),
    /// The atomic commit write failed; the staged set is left intact so the
    /// caller may retry the commit unchanged.
    TransactionFailed(String),
    /// Malformed input rejected at the boundary, never silently coerced.
    InvalidInput(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(message) => write!(f, "store unavailable: {message}"),
            StoreError::TransactionFailed(message) => {
                write!(f, "commit transaction failed: {message}")
            }
            StoreError::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<ColumnNameError> for StoreError {
    fn from(err: ColumnNameError) -> Self {
        StoreError::InvalidInput(err.to_string())
    }
}

pub trait CellRepository: Send + Sync {
    /// Creates the versioned cell table on a fresh store; a no-op otherwise.
    fn init(&self) -> Result<(), StoreError>;

    /// All cell facts whose validity interval contains `now`, sorted by
    /// (row, col).
    fn query_valid_as_of(&self, now: DateTime<Utc>) -> Result<Vec<CellTriple>, StoreError>;

    /// Atomically reconciles the staged set against a fresh baseline read as
    /// of `now`: expired and superseded records are closed at `now`, new and
    /// superseding facts open at `now`. All-or-nothing.
    fn commit_staged(
        &self,
        staged: &BTreeMap<CellCoord, String>,
        now: DateTime<Utc>,
    ) -> Result<CommitOutcome, StoreError>;

    /// Full bitemporal history for one coordinate, oldest first.
    fn history(&self, coord: CellCoord) -> Result<Vec<VersionedRecord>, StoreError>;
}
