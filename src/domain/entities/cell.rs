use chrono::{DateTime, Utc};

/// Logical cell position. Rows and columns are 0-indexed and unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A sparse cell fact: one non-empty value at one coordinate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellTriple {
    pub row: usize,
    pub col: usize,
    pub value: String,
}

impl CellTriple {
    pub fn new(row: usize, col: usize, value: impl Into<String>) -> Self {
        Self {
            row,
            col,
            value: value.into(),
        }
    }

    pub fn coord(&self) -> CellCoord {
        CellCoord {
            row: self.row,
            col: self.col,
        }
    }
}

/// An append-only bitemporal fact: the coordinate held this value during
/// the half-open interval `[valid_from, valid_to)`. An open record carries
/// the sentinel unbounded `valid_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedRecord {
    pub row: usize,
    pub col: usize,
    pub value: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
}

/// Operation counts from one commit. A no-op commit has all three at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOutcome {
    pub inserted: usize,
    pub expired: usize,
    pub superseded: usize,
}

impl CommitOutcome {
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.expired == 0 && self.superseded == 0
    }
}
