use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Sentinel "unbounded future" valid_to marking the open record.
pub const UNBOUNDED_VALID_TO: &str = "9999-12-31T23:59:59.999999Z";

/// Fixed-width RFC 3339 UTC with microseconds, so lexicographic comparison
/// in SQL equals chronological comparison.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .with_context(|| format!("failed to parse stored timestamp: {text}"))
}

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.busy_timeout(Duration::from_millis(5000))
        .context("failed to set busy timeout")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    // No composite primary key on (row_idx, col_idx): the log keeps one
    // closed record per superseded value plus at most one open record per
    // coordinate. The partial unique index enforces the at-most-one-open
    // invariant without rejecting history.
    conn.execute_batch(&format!(
        "
        CREATE TABLE IF NOT EXISTS cell_version (
            row_idx     INTEGER NOT NULL,
            col_idx     INTEGER NOT NULL,
            value       TEXT NOT NULL,
            valid_from  TEXT NOT NULL,
            valid_to    TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_cell_version_open
            ON cell_version(row_idx, col_idx)
            WHERE valid_to = '{UNBOUNDED_VALID_TO}';

        CREATE INDEX IF NOT EXISTS idx_cell_version_interval
            ON cell_version(valid_from, valid_to);
        ",
    ))
    .context("failed to initialize schema")?;

    Ok(())
}
