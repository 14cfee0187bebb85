use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::entities::cell::{CellCoord, CellTriple, CommitOutcome, VersionedRecord};
use crate::infra::sqlite::queries::{commit_staged, query_history, query_valid_as_of};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{CellRepository, StoreError};

/// SQLite-backed bitemporal cell log at a filesystem path. How the path was
/// obtained (host blob, temp file, user pick) is the caller's concern.
pub struct SqliteCellRepo {
    pub db_path: PathBuf,
}

impl SqliteCellRepo {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl CellRepository for SqliteCellRepo {
    fn init(&self) -> Result<(), StoreError> {
        init_db(&self.db_path).map_err(|err| StoreError::Unavailable(err.to_string()))
    }

    fn query_valid_as_of(&self, now: DateTime<Utc>) -> Result<Vec<CellTriple>, StoreError> {
        query_valid_as_of(&self.db_path, now)
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }

    fn commit_staged(
        &self,
        staged: &BTreeMap<CellCoord, String>,
        now: DateTime<Utc>,
    ) -> Result<CommitOutcome, StoreError> {
        commit_staged(&self.db_path, staged, now)
            .map_err(|err| StoreError::TransactionFailed(err.to_string()))
    }

    fn history(&self, coord: CellCoord) -> Result<Vec<VersionedRecord>, StoreError> {
        query_history(&self.db_path, coord).map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}
