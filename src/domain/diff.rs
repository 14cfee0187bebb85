use std::collections::BTreeMap;

use crate::domain::entities::cell::{CellCoord, CellTriple};

/// Minimal operation set turning the persisted baseline into the staged set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// In baseline, absent from staged: close the open record.
    pub to_expire: Vec<CellCoord>,
    /// In staged, absent from baseline: open a new record.
    pub to_insert: Vec<CellTriple>,
    /// In both with a different value: close the open record and open a new one.
    pub to_supersede: Vec<CellTriple>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.to_expire.is_empty() && self.to_insert.is_empty() && self.to_supersede.is_empty()
    }
}

/// Partitions coordinates by baseline/staged membership. Coordinates holding
/// the same value on both sides produce no operation, which is what makes a
/// repeated commit a no-op.
pub fn partition(
    baseline: &BTreeMap<CellCoord, String>,
    staged: &BTreeMap<CellCoord, String>,
) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for coord in baseline.keys() {
        if !staged.contains_key(coord) {
            changes.to_expire.push(*coord);
        }
    }

    for (coord, value) in staged {
        match baseline.get(coord) {
            None => changes
                .to_insert
                .push(CellTriple::new(coord.row, coord.col, value.clone())),
            Some(existing) if existing != value => changes
                .to_supersede
                .push(CellTriple::new(coord.row, coord.col, value.clone())),
            Some(_) => {}
        }
    }

    changes
}
