//! A single parsed game record.

use chrono::NaiveDate;

use crate::result::GameResult;

/// Value used by PGN for tags whose content is unknown.
const UNKNOWN: &str = "?";

/// A chess game as recorded in PGN: tag pairs, mainline moves and result.
///
/// Tag pairs keep their original order. Moves are SAN strings with move
/// numbers and annotations already removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChessGame {
    tags: Vec<(String, String)>,
    moves: Vec<String>,
    result: GameResult,
}

impl ChessGame {
    /// Creates a game from its parts.
    pub fn new(tags: Vec<(String, String)>, moves: Vec<String>, result: GameResult) -> Self {
        Self {
            tags,
            moves,
            result,
        }
    }

    /// Builds a game from reader output, taking the result from the
    /// termination marker when there is one and from the `Result` tag
    /// otherwise.
    pub(crate) fn from_parts(
        tags: Vec<(String, String)>,
        moves: Vec<String>,
        terminator: Option<GameResult>,
    ) -> Self {
        let result = terminator
            .or_else(|| {
                tags.iter()
                    .find(|(name, _)| name == "Result")
                    .and_then(|(_, value)| GameResult::from_token(value.trim()))
            })
            .unwrap_or_default();
        Self::new(tags, moves, result)
    }

    /// Returns all tag pairs in file order.
    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    /// Returns the value of the first tag with the given name.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn tag_or_unknown(&self, name: &str) -> &str {
        match self.tag(name) {
            Some(v) if !v.trim().is_empty() => v,
            _ => UNKNOWN,
        }
    }

    pub fn event(&self) -> &str {
        self.tag_or_unknown("Event")
    }

    pub fn site(&self) -> &str {
        self.tag_or_unknown("Site")
    }

    pub fn white(&self) -> &str {
        self.tag_or_unknown("White")
    }

    pub fn black(&self) -> &str {
        self.tag_or_unknown("Black")
    }

    pub fn white_elo(&self) -> Option<u32> {
        self.tag("WhiteElo").and_then(parse_elo)
    }

    pub fn black_elo(&self) -> Option<u32> {
        self.tag("BlackElo").and_then(parse_elo)
    }

    /// The date the game was played.
    pub fn date(&self) -> Option<NaiveDate> {
        self.tag("Date").and_then(parse_date)
    }

    /// The date of the event, falling back to the game date when the
    /// `EventDate` tag is missing or incomplete.
    pub fn event_date(&self) -> Option<NaiveDate> {
        self.tag("EventDate")
            .and_then(parse_date)
            .or_else(|| self.date())
    }

    /// Mainline moves in SAN.
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Movetext in compact form, e.g. `1.e4 e5 2.Nf3 Nc6`.
    pub fn movetext(&self) -> String {
        self.moves
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| match pair {
                [white, black] => format!("{}.{} {}", i + 1, white, black),
                [white] => format!("{}.{}", i + 1, white),
                _ => String::new(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Parses a PGN date (`YYYY.MM.DD`).
///
/// Returns `None` when any component is unknown (`??`) or the date does not
/// exist. A `-` separator is accepted as well.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().split(['.', '-']);
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a rating tag value. `?`, `-` and empty values are unknown.
pub fn parse_elo(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}
