//! Player storage with monotonic ratings.

use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};

use crate::models::PlayerRating;

/// Returns the id of the named player, inserting them if new.
///
/// The stored rating only ever goes up: an existing player's Elo is
/// replaced only when `elo` is higher. A missing rating counts as 0.
pub fn upsert_player(conn: &Connection, name: &str, elo: Option<u32>) -> SqliteResult<i64> {
    conn.execute(
        "INSERT INTO players (name, elo) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET elo = excluded.elo
         WHERE excluded.elo > players.elo",
        params![name, elo.unwrap_or(0)],
    )?;

    conn.query_row("SELECT id FROM players WHERE name = ?1", [name], |row| {
        row.get(0)
    })
}

/// Looks up a player by exact name.
pub fn get_player(conn: &Connection, name: &str) -> SqliteResult<Option<PlayerRating>> {
    conn.query_row(
        "SELECT name, elo FROM players WHERE name = ?1",
        [name],
        |row| {
            Ok(PlayerRating {
                name: row.get(0)?,
                elo: row.get(1)?,
            })
        },
    )
    .optional()
}
