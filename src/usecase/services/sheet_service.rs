use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::cell::{CellCoord, CellTriple, CommitOutcome, VersionedRecord};
use crate::domain::grid::triples_to_grid;
use crate::usecase::ports::clock::Clock;
use crate::usecase::ports::repo::{CellRepository, StoreError};

/// The versioned cell store: a staged working copy of the currently-valid
/// cells, reconciled against the bitemporal log on commit.
pub struct SheetService {
    repo: Arc<dyn CellRepository>,
    clock: Arc<dyn Clock>,
    staged: BTreeMap<CellCoord, String>,
    max_row: usize,
    max_col: usize,
}

impl SheetService {
    /// Initializes the backing store if needed, then loads the baseline
    /// valid as of the clock's now into the staged set.
    pub fn open(repo: Arc<dyn CellRepository>, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        repo.init()?;
        let mut service = Self {
            repo,
            clock,
            staged: BTreeMap::new(),
            max_row: 0,
            max_col: 0,
        };
        service.reload()?;
        Ok(service)
    }

    fn reload(&mut self) -> Result<(), StoreError> {
        let baseline = self.repo.query_valid_as_of(self.clock.now())?;
        self.max_row = baseline.iter().map(|triple| triple.row).max().unwrap_or(0);
        self.max_col = baseline.iter().map(|triple| triple.col).max().unwrap_or(0);
        self.staged = baseline
            .into_iter()
            .map(|triple| (triple.coord(), triple.value))
            .collect();
        log::debug!(
            "loaded {} cells, extents ({}, {})",
            self.staged.len(),
            self.max_row,
            self.max_col
        );
        Ok(())
    }

    /// Dense row-major view of the staged set, recomputed on demand.
    pub fn current_grid(&self) -> Vec<Vec<String>> {
        let triples: Vec<CellTriple> = self
            .staged
            .iter()
            .map(|(coord, value)| CellTriple::new(coord.row, coord.col, value.clone()))
            .collect();
        triples_to_grid(&triples)
    }

    /// Stages a cell edit. The value is trimmed; an empty result is a no-op
    /// and never removes an existing value at the coordinate. Idempotent,
    /// infallible, touches no persisted state.
    pub fn update_cell(&mut self, row: usize, col: usize, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.staged.insert(CellCoord { row, col }, value.to_string());
    }

    /// Commits the staged set: the repository diffs it against a fresh
    /// baseline and applies the minimal expire/insert set in one
    /// transaction, then the service resynchronizes from the store. On
    /// failure the staged set is untouched and the commit may be retried.
    pub fn commit(&mut self) -> Result<CommitOutcome, StoreError> {
        let outcome = self.repo.commit_staged(&self.staged, self.clock.now())?;
        self.reload()?;
        log::info!(
            "committed {} inserts, {} expiries, {} supersedes",
            outcome.inserted,
            outcome.expired,
            outcome.superseded
        );
        Ok(outcome)
    }

    /// Bitemporal history of one coordinate, oldest first.
    pub fn history(&self, row: usize, col: usize) -> Result<Vec<VersionedRecord>, StoreError> {
        self.repo.history(CellCoord { row, col })
    }

    /// Largest populated row index as of the last load. 0 when empty.
    pub fn max_row(&self) -> usize {
        self.max_row
    }

    /// Largest populated column index as of the last load. 0 when empty.
    pub fn max_col(&self) -> usize {
        self.max_col
    }
}
