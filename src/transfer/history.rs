//! v4 download history transfer
//!
//! Copies the rows of a v4 `media` table into the current history store.
//! Rows already present (same domain, url path and original filename) are
//! left untouched, so importing the same database twice is a no-op.

use std::fs;
use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use tracing::debug;

use super::TransferError;

/// Schema of the current history store.
pub const CURRENT_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS media (
    domain TEXT NOT NULL,
    url_path TEXT NOT NULL,
    referer TEXT NOT NULL DEFAULT '',
    album_id TEXT,
    download_path TEXT,
    download_filename TEXT,
    original_filename TEXT NOT NULL,
    file_size INT,
    duration FLOAT,
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    completed_at TIMESTAMP,
    PRIMARY KEY (domain, url_path, original_filename)
);
";

/// Columns a v4 `media` table must have.
const REQUIRED_COLUMNS: [&str; 3] = ["domain", "url_path", "original_filename"];

/// Columns copied from the legacy table, in insert order.
/// Missing optional columns are read as NULL.
const COPIED_COLUMNS: [&str; 9] = [
    "domain",
    "url_path",
    "referer",
    "download_path",
    "download_filename",
    "original_filename",
    "completed",
    "created_at",
    "completed_at",
];

const INSERT_ROW: &str = "INSERT OR IGNORE INTO media (
    domain, url_path, referer, download_path, download_filename,
    original_filename, completed, created_at, completed_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

/// Merge the v4 history database at `source` into `destination`.
///
/// The destination (and its parent directory) is created when missing.
/// Returns the number of rows that were added.
pub fn transfer_v4_history(source: &Path, destination: &Path) -> Result<usize, TransferError> {
    // Read everything first so the source is closed before the destination
    // takes its write lock. Both paths may name the same file. The cost is
    // holding the whole legacy table in memory; v4 history tables are one row
    // per downloaded file.
    let rows = read_legacy_rows(source)?;
    debug!(source = %source.display(), rows = rows.len(), "Read legacy history rows");

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TransferError::io(parent, e))?;
    }

    let mut conn =
        Connection::open(destination).map_err(|e| TransferError::sqlite(destination, e))?;
    conn.execute_batch(CURRENT_SCHEMA)
        .map_err(|e| TransferError::sqlite(destination, e))?;

    let tx = conn
        .transaction()
        .map_err(|e| TransferError::sqlite(destination, e))?;
    let mut inserted = 0;
    {
        let mut stmt = tx
            .prepare(INSERT_ROW)
            .map_err(|e| TransferError::sqlite(destination, e))?;
        for row in &rows {
            inserted += stmt
                .execute(params_from_iter(row.iter()))
                .map_err(|e| TransferError::sqlite(destination, e))?;
        }
    }
    tx.commit()
        .map_err(|e| TransferError::sqlite(destination, e))?;

    Ok(inserted)
}

/// Read every `media` row of a v4 database, normalized to [`COPIED_COLUMNS`].
fn read_legacy_rows(source: &Path) -> Result<Vec<Vec<Value>>, TransferError> {
    let conn = Connection::open_with_flags(
        source,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| TransferError::sqlite(source, e))?;

    let columns = media_columns(&conn).map_err(|e| TransferError::sqlite(source, e))?;
    if columns.is_empty() {
        return Err(TransferError::schema(source, "missing table 'media'"));
    }
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|c| !columns.iter().any(|have| have == *c))
    {
        return Err(TransferError::schema(
            source,
            format!("table 'media' has no column '{}'", missing),
        ));
    }

    let select = select_statement(&columns);
    let mut stmt = conn
        .prepare(&select)
        .map_err(|e| TransferError::sqlite(source, e))?;
    let rows = stmt
        .query_map([], |row| {
            (0..COPIED_COLUMNS.len())
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<_>>>()
        })
        .map_err(|e| TransferError::sqlite(source, e))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| TransferError::sqlite(source, e))?;

    Ok(rows)
}

/// Column names of the `media` table; empty when the table does not exist.
fn media_columns(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info(media)")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

/// Build the legacy SELECT, substituting defaults for absent columns.
fn select_statement(present: &[String]) -> String {
    let exprs: Vec<String> = COPIED_COLUMNS
        .iter()
        .map(|&column| {
            let has = present.iter().any(|p| p == column);
            match (column, has) {
                ("referer", true) => "COALESCE(referer, '')".to_string(),
                ("referer", false) => "''".to_string(),
                ("completed", true) => "COALESCE(completed, 0)".to_string(),
                ("completed", false) => "0".to_string(),
                (_, true) => column.to_string(),
                (_, false) => "NULL".to_string(),
            }
        })
        .collect();
    format!("SELECT {} FROM media", exprs.join(", "))
}
