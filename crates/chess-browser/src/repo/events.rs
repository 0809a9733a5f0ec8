//! Event storage.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult};

/// Returns the id of the event with this name and date, inserting it first
/// if it is new.
///
/// Events are deduplicated by `(name, date)`; an unknown date counts as its
/// own value. The site of the first upload is kept.
pub fn ensure_event(
    conn: &Connection,
    name: &str,
    site: &str,
    date: Option<NaiveDate>,
) -> SqliteResult<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO events (name, site, date) VALUES (?1, ?2, ?3)",
        params![name, site, date],
    )?;

    conn.query_row(
        "SELECT id FROM events WHERE name = ?1 AND date IS ?2",
        params![name, date],
        |row| row.get(0),
    )
}
