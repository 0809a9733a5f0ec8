//! Search filters for stored games.
//!
//! A [`GameFilter`] compiles to one parameterized `SELECT`. Every filter that
//! is set adds a condition, and all conditions must hold. User input is only
//! ever bound as a parameter.

use chess_pgn::{read_from_str, ChessGame, GameResult};
use chrono::NaiveDate;
use rusqlite::types::Value;

use crate::error::BrowserError;
use crate::models::Winner;

/// Inclusive range of event dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range covering `start` through `end`.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::InvalidDateRange`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BrowserError> {
        if start > end {
            return Err(BrowserError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Filters for a game search. Unset fields and empty strings match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    /// Exact name of the white player.
    pub white: Option<String>,
    /// Exact name of the black player.
    pub black: Option<String>,
    /// Leading moves, e.g. `e4` or `1. d4 Nf6 2. c4`.
    pub opening: Option<String>,
    pub winner: Option<Winner>,
    /// Range for the event date; games with an unknown date never match.
    pub dates: Option<DateRange>,
}

const SELECT_GAMES: &str = "SELECT e.name, e.site, e.date, w.name, w.elo, b.name, b.elo, g.result, g.moves
     FROM games g
     JOIN events e ON e.id = g.event_id
     JOIN players w ON w.id = g.white_player
     JOIN players b ON b.id = g.black_player";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl GameFilter {
    /// Returns true if no filter is set.
    pub fn is_empty(&self) -> bool {
        non_empty(&self.white).is_none()
            && non_empty(&self.black).is_none()
            && self.opening_prefix().is_none()
            && self.winner.is_none()
            && self.dates.is_none()
    }

    /// The opening in stored movetext form (`1.e4 e5 2.Nf3`).
    ///
    /// Input is read as PGN movetext, so move numbers are optional. If it
    /// does not read as moves it is used as typed.
    pub fn opening_prefix(&self) -> Option<String> {
        let opening = non_empty(&self.opening)?;
        let moves = read_from_str(opening)
            .ok()
            .and_then(|games| games.into_iter().next())
            .map(|game| game.moves().to_vec())
            .unwrap_or_default();
        if moves.is_empty() {
            return Some(opening.to_string());
        }
        Some(ChessGame::new(Vec::new(), moves, GameResult::Unknown).movetext())
    }

    /// Builds the search statement and its positional parameters.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        if let Some(white) = non_empty(&self.white) {
            params.push(Value::Text(white.to_string()));
            clauses.push(format!("w.name = ?{}", params.len()));
        }
        if let Some(black) = non_empty(&self.black) {
            params.push(Value::Text(black.to_string()));
            clauses.push(format!("b.name = ?{}", params.len()));
        }
        if let Some(prefix) = self.opening_prefix() {
            // Match whole moves: the movetext is the prefix or continues after a space.
            params.push(Value::Text(prefix.clone()));
            let exact = params.len();
            params.push(Value::Text(format!("{} ", prefix)));
            let longer = params.len();
            clauses.push(format!(
                "(g.moves = ?{exact} OR substr(g.moves, 1, length(?{longer})) = ?{longer})"
            ));
        }
        if let Some(winner) = self.winner {
            params.push(Value::Text(winner.code().to_string()));
            clauses.push(format!("g.result = ?{}", params.len()));
        }
        if let Some(range) = self.dates {
            params.push(Value::Text(range.start.format("%Y-%m-%d").to_string()));
            let start = params.len();
            params.push(Value::Text(range.end.format("%Y-%m-%d").to_string()));
            clauses.push(format!("e.date BETWEEN ?{start} AND ?{}", params.len()));
        }

        let mut sql = SELECT_GAMES.to_string();
        if !clauses.is_empty() {
            sql.push_str("\n     WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str("\n     ORDER BY e.date, e.name, g.id");

        (sql, params)
    }
}
