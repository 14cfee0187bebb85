use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, TransactionBehavior};

use crate::domain::diff::partition;
use crate::domain::entities::cell::{CellCoord, CellTriple, CommitOutcome, VersionedRecord};
use crate::infra::sqlite::schema::{
    format_timestamp, open_connection, parse_timestamp, UNBOUNDED_VALID_TO,
};

// Validity is the half-open test valid_from <= now < valid_to, so a record
// closed at `now` and its successor opened at `now` never overlap.
const VALID_AS_OF_SQL: &str = "SELECT row_idx, col_idx, value
     FROM cell_version
     WHERE valid_from <= ?1 AND ?1 < valid_to
     ORDER BY row_idx ASC, col_idx ASC";

pub fn query_valid_as_of(db_path: &Path, now: DateTime<Utc>) -> Result<Vec<CellTriple>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(VALID_AS_OF_SQL)
        .context("failed to prepare valid-as-of query")?;

    let triples = stmt
        .query_map([format_timestamp(now)], |row| {
            Ok(CellTriple {
                row: row.get::<_, i64>(0)? as usize,
                col: row.get::<_, i64>(1)? as usize,
                value: row.get(2)?,
            })
        })
        .context("failed to query valid cells")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect valid cells")?;

    Ok(triples)
}

pub fn insert_records(
    tx: &rusqlite::Transaction<'_>,
    triples: &[CellTriple],
    valid_from: &str,
) -> Result<()> {
    let mut insert_stmt = tx
        .prepare(
            "INSERT INTO cell_version(row_idx, col_idx, value, valid_from, valid_to)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .context("failed to prepare record insert")?;

    for triple in triples {
        insert_stmt
            .execute(params![
                triple.row as i64,
                triple.col as i64,
                triple.value,
                valid_from,
                UNBOUNDED_VALID_TO
            ])
            .context("failed to insert record")?;
    }

    Ok(())
}

pub fn expire_records(
    tx: &rusqlite::Transaction<'_>,
    coords: &[CellCoord],
    expire_at: &str,
) -> Result<()> {
    let mut expire_stmt = tx
        .prepare(
            "UPDATE cell_version SET valid_to = ?1
             WHERE row_idx = ?2 AND col_idx = ?3 AND valid_to = ?4",
        )
        .context("failed to prepare record expiry")?;

    for coord in coords {
        expire_stmt
            .execute(params![
                expire_at,
                coord.row as i64,
                coord.col as i64,
                UNBOUNDED_VALID_TO
            ])
            .context("failed to expire record")?;
    }

    Ok(())
}

/// Re-reads the baseline valid as of `now`, diffs it against the staged set
/// and applies the minimal expire/insert set, all inside one immediate
/// transaction. Immediate mode takes the write lock before the baseline
/// read, serializing commits against the same store.
pub fn commit_staged(
    db_path: &Path,
    staged: &BTreeMap<CellCoord, String>,
    now: DateTime<Utc>,
) -> Result<CommitOutcome> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("failed to start commit transaction")?;
    let now_text = format_timestamp(now);

    let mut baseline = BTreeMap::new();
    {
        let mut stmt = tx
            .prepare(VALID_AS_OF_SQL)
            .context("failed to prepare baseline query")?;
        let rows = stmt
            .query_map([now_text.as_str()], |row| {
                Ok((
                    CellCoord {
                        row: row.get::<_, i64>(0)? as usize,
                        col: row.get::<_, i64>(1)? as usize,
                    },
                    row.get::<_, String>(2)?,
                ))
            })
            .context("failed to query commit baseline")?;
        for row in rows {
            let (coord, value) = row.context("failed to read baseline row")?;
            if !value.is_empty() {
                baseline.insert(coord, value);
            }
        }
    }

    let staged: BTreeMap<CellCoord, String> = staged
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(coord, value)| (*coord, value.clone()))
        .collect();

    let changes = partition(&baseline, &staged);

    let mut to_close = changes.to_expire.clone();
    to_close.extend(changes.to_supersede.iter().map(|triple| triple.coord()));
    expire_records(&tx, &to_close, &now_text)?;

    let mut to_open = changes.to_insert.clone();
    to_open.extend(changes.to_supersede.iter().cloned());
    insert_records(&tx, &to_open, &now_text)?;

    tx.commit().context("failed to commit cell versions")?;

    log::debug!(
        "commit at {now_text}: {} inserted, {} expired, {} superseded",
        changes.to_insert.len(),
        changes.to_expire.len(),
        changes.to_supersede.len()
    );

    Ok(CommitOutcome {
        inserted: changes.to_insert.len(),
        expired: changes.to_expire.len(),
        superseded: changes.to_supersede.len(),
    })
}

pub fn query_history(db_path: &Path, coord: CellCoord) -> Result<Vec<VersionedRecord>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT value, valid_from, valid_to
             FROM cell_version
             WHERE row_idx = ?1 AND col_idx = ?2
             ORDER BY valid_from ASC",
        )
        .context("failed to prepare history query")?;

    let rows = stmt
        .query_map(params![coord.row as i64, coord.col as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .context("failed to query history")?;

    let mut records = Vec::new();
    for row in rows {
        let (value, valid_from, valid_to) = row.context("failed to read history row")?;
        records.push(VersionedRecord {
            row: coord.row,
            col: coord.col,
            value,
            valid_from: parse_timestamp(&valid_from)?,
            valid_to: parse_timestamp(&valid_to)?,
        });
    }

    Ok(records)
}
