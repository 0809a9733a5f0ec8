//! Error type shared by the browser library.

use chess_pgn::PgnError;
use chrono::NaiveDate;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by uploads, queries and report rendering.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("invalid PGN: {0}")]
    Pgn(#[from] PgnError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A thread panicked while holding the database connection.
    #[error("database connection lock was poisoned")]
    LockPoisoned,

    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}
