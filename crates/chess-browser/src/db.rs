//! Database module for the chess browser.

use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::BrowserError;

/// Thread-safe database connection pool.
pub type DbPool = Arc<Mutex<Connection>>;

/// Opens the database and makes sure the schema exists.
///
/// Creates the three tables used by the browser:
/// - `events`: tournaments, unique by name and date
/// - `players`: one row per name with the highest Elo seen
/// - `games`: results and movetext referencing players and events
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file (use `:memory:` for in-memory)
///
/// # Errors
///
/// Returns an error if the database cannot be opened or schema creation fails.
pub fn open<P: AsRef<Path>>(path: P) -> SqliteResult<DbPool> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Enables foreign keys and creates tables and indexes if missing.
pub fn init_schema(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            site TEXT NOT NULL,
            date TEXT
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_events_name_date
            ON events(name, COALESCE(date, ''));
        CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);

        CREATE TABLE IF NOT EXISTS players (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            elo INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            result TEXT NOT NULL CHECK (result IN ('W', 'B', 'D')),
            moves TEXT NOT NULL,
            white_player INTEGER NOT NULL REFERENCES players(id),
            black_player INTEGER NOT NULL REFERENCES players(id),
            event_id INTEGER NOT NULL REFERENCES events(id),
            UNIQUE (event_id, white_player, black_player, moves)
        );

        CREATE INDEX IF NOT EXISTS idx_games_white ON games(white_player);
        CREATE INDEX IF NOT EXISTS idx_games_black ON games(black_player);
        ",
    )
}

/// Locks the shared connection.
///
/// # Errors
///
/// Returns [`BrowserError::LockPoisoned`] if another thread panicked while
/// holding the lock.
pub fn lock(db: &DbPool) -> Result<MutexGuard<'_, Connection>, BrowserError> {
    db.lock().map_err(|_| BrowserError::LockPoisoned)
}
