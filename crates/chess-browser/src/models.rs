//! Domain models shared by the repository, queries and reports.

use chess_pgn::GameResult;
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The side that won a game, or a draw.
///
/// Stored in the `games.result` column as `W`, `B` or `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl Winner {
    /// Single-letter code used in the database.
    pub fn code(self) -> &'static str {
        match self {
            Winner::White => "W",
            Winner::Black => "B",
            Winner::Draw => "D",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "W" => Some(Winner::White),
            "B" => Some(Winner::Black),
            "D" => Some(Winner::Draw),
            _ => None,
        }
    }

    /// Maps a PGN result; undecided games (`*`) have no winner code.
    pub fn from_result(result: GameResult) -> Option<Self> {
        match result {
            GameResult::WhiteWins => Some(Winner::White),
            GameResult::BlackWins => Some(Winner::Black),
            GameResult::Draw => Some(Winner::Draw),
            GameResult::Unknown => None,
        }
    }
}

impl From<Winner> for GameResult {
    fn from(winner: Winner) -> Self {
        match winner {
            Winner::White => GameResult::WhiteWins,
            Winner::Black => GameResult::BlackWins,
            Winner::Draw => GameResult::Draw,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Winner {
    type Err = String;

    /// Accepts `white`, `black` or `draw` in any case, or the stored codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Winner::White),
            "black" | "b" => Ok(Winner::Black),
            "draw" | "d" => Ok(Winner::Draw),
            other => Err(format!(
                "unknown winner '{}': expected white, black or draw",
                other
            )),
        }
    }
}

impl ToSql for Winner {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for Winner {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;
        Winner::from_code(code)
            .ok_or_else(|| FromSqlError::Other(format!("invalid result code '{}'", code).into()))
    }
}

/// A player name with their stored (highest observed) rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub name: String,
    /// Highest Elo seen across uploads; 0 when never recorded.
    pub elo: u32,
}

/// A game returned by a search, joined with its event and players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Event name.
    pub event: String,
    pub site: String,
    /// Event date, if known.
    pub date: Option<NaiveDate>,
    pub white: PlayerRating,
    pub black: PlayerRating,
    pub result: Winner,
    /// Compact movetext, e.g. `1.e4 e5 2.Nf3`.
    pub moves: String,
}

/// Row counts for each table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub events: i64,
    pub players: i64,
    pub games: i64,
}
