//! Uploading parsed PGN games into the database.
//!
//! Each game stores its event, both players (raising their Elo if the new
//! rating is higher) and the game itself. A whole upload is one transaction:
//! either every game is processed or nothing is written.

use chess_pgn::ChessGame;
use rusqlite::{Connection, Result as SqliteResult};
use serde::Serialize;
use std::path::Path;

use crate::db::{self, DbPool};
use crate::error::BrowserError;
use crate::models::Winner;
use crate::progress::ProgressSink;
use crate::repo::{events, games, players, NewGame};

/// What happened to the games of one upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    /// Games read from the input.
    pub total: usize,
    /// Games stored for the first time.
    pub inserted: usize,
    /// Games that were already stored.
    pub duplicates: usize,
    /// Games without a decided result, which cannot be stored.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stored {
    Inserted,
    Duplicate,
    Skipped,
}

/// Uploads games into a database.
pub struct Uploader {
    db: DbPool,
}

impl Uploader {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Parses a PGN file and uploads all of its games.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Pgn`] if the file cannot be read,
    /// and [`BrowserError::Database`] if storing fails. Nothing is written
    /// in either case.
    pub fn upload_file<P: AsRef<Path>>(
        &self,
        path: P,
        progress: &mut dyn ProgressSink,
    ) -> Result<UploadSummary, BrowserError> {
        let path = path.as_ref();
        tracing::info!("Reading games from {}", path.display());
        let games = chess_pgn::read_from_file(path)?;
        tracing::info!("Parsed {} games from {}", games.len(), path.display());
        self.upload_games(&games, progress)
    }

    /// Uploads already parsed games.
    ///
    /// Reports the number of games through [`ProgressSink::set_total`] before
    /// starting and calls [`ProgressSink::step`] after each game.
    pub fn upload_games(
        &self,
        games: &[ChessGame],
        progress: &mut dyn ProgressSink,
    ) -> Result<UploadSummary, BrowserError> {
        progress.set_total(games.len());

        let mut conn = db::lock(&self.db)?;
        let tx = conn.transaction()?;

        let mut summary = UploadSummary {
            total: games.len(),
            ..Default::default()
        };
        for game in games {
            match store_game(&tx, game)? {
                Stored::Inserted => summary.inserted += 1,
                Stored::Duplicate => summary.duplicates += 1,
                Stored::Skipped => summary.skipped += 1,
            }
            progress.step();
        }

        tx.commit()?;
        tracing::info!(
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            skipped = summary.skipped,
            "Upload committed"
        );
        Ok(summary)
    }
}

fn store_game(conn: &Connection, game: &ChessGame) -> SqliteResult<Stored> {
    let Some(result) = Winner::from_result(game.result()) else {
        tracing::warn!(
            white = game.white(),
            black = game.black(),
            event = game.event(),
            "Skipping game without a decided result"
        );
        return Ok(Stored::Skipped);
    };

    let event_id = events::ensure_event(conn, game.event(), game.site(), game.event_date())?;
    let white_id = players::upsert_player(conn, game.white(), game.white_elo())?;
    let black_id = players::upsert_player(conn, game.black(), game.black_elo())?;
    let moves = game.movetext();

    let inserted = games::insert_game(
        conn,
        &NewGame {
            event_id,
            white_id,
            black_id,
            result,
            moves: &moves,
        },
    )?;

    if inserted {
        Ok(Stored::Inserted)
    } else {
        tracing::debug!(
            white = game.white(),
            black = game.black(),
            "Game already stored"
        );
        Ok(Stored::Duplicate)
    }
}
