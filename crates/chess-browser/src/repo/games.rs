//! Game repository for database operations.

use rusqlite::{params, params_from_iter, Connection, Result as SqliteResult};

use crate::db::{self, DbPool};
use crate::error::BrowserError;
use crate::models::{GameRecord, PlayerRating, Totals, Winner};
use crate::query::GameFilter;

/// A game ready to be stored, with its event and players already resolved.
#[derive(Debug, Clone, Copy)]
pub struct NewGame<'a> {
    pub event_id: i64,
    pub white_id: i64,
    pub black_id: i64,
    pub result: Winner,
    pub moves: &'a str,
}

/// Inserts a game unless the same game is already stored.
///
/// Two games are the same when they share event, both players and the full
/// movetext. Returns `true` if a row was inserted.
pub fn insert_game(conn: &Connection, game: &NewGame<'_>) -> SqliteResult<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO games (result, moves, white_player, black_player, event_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            game.result,
            game.moves,
            game.white_id,
            game.black_id,
            game.event_id
        ],
    )?;
    Ok(inserted > 0)
}

/// Repository for searching stored games.
pub struct GameRepo {
    db: DbPool,
}

impl GameRepo {
    /// Create a new game repository with the given database pool.
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Returns every game matching the filter, ordered by event date.
    pub fn search(&self, filter: &GameFilter) -> Result<Vec<GameRecord>, BrowserError> {
        let (sql, values) = filter.to_sql();
        tracing::debug!(%sql, params = values.len(), "Searching games");

        let conn = db::lock(&self.db)?;
        let mut stmt = conn.prepare(&sql)?;
        let games = stmt
            .query_map(params_from_iter(values.iter()), Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        tracing::debug!("Search returned {} games", games.len());
        Ok(games)
    }

    /// Counts stored events, players and games.
    pub fn counts(&self) -> Result<Totals, BrowserError> {
        let conn = db::lock(&self.db)?;
        let totals = conn.query_row(
            "SELECT (SELECT COUNT(*) FROM events),
                    (SELECT COUNT(*) FROM players),
                    (SELECT COUNT(*) FROM games)",
            [],
            |row| {
                Ok(Totals {
                    events: row.get(0)?,
                    players: row.get(1)?,
                    games: row.get(2)?,
                })
            },
        )?;
        Ok(totals)
    }

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<GameRecord> {
        Ok(GameRecord {
            event: row.get(0)?,
            site: row.get(1)?,
            date: row.get(2)?,
            white: PlayerRating {
                name: row.get(3)?,
                elo: row.get(4)?,
            },
            black: PlayerRating {
                name: row.get(5)?,
                elo: row.get(6)?,
            },
            result: row.get(7)?,
            moves: row.get(8)?,
        })
    }
}
