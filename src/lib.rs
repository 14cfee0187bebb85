//! Sparse spreadsheet data layer backed by a bitemporal SQLite log.
//!
//! Cell edits accumulate in an in-memory staged set; a commit diffs the
//! staged set against a fresh baseline read and applies the minimal
//! expire/insert set in one transaction, preserving full history.

pub mod domain;
pub mod infra;
pub mod usecase;

pub use domain::colname::{column_index_to_name, name_to_column_index, ColumnNameError};
pub use domain::entities::cell::{CellCoord, CellTriple, CommitOutcome, VersionedRecord};
pub use domain::grid::{grid_to_triples, triples_to_grid};
pub use infra::sqlite::repo::SqliteCellRepo;
pub use usecase::ports::clock::{Clock, FixedClock, SystemClock};
pub use usecase::ports::repo::{CellRepository, StoreError};
pub use usecase::services::sheet_service::SheetService;
