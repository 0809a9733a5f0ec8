//! Rendering of search results.
//!
//! Three formats are supported:
//! - plain text, one block of `Label: value` lines per game
//! - JSON, for scripts
//! - PGN, to export the matching games to other chess software

use chess_pgn::{read_from_str, ChessGame, GameResult};
use serde::{Deserialize, Serialize};

use crate::error::BrowserError;
use crate::models::{GameRecord, PlayerRating, Winner};

/// Shown in text reports when an event has no known date.
const UNKNOWN_DATE: &str = "0000-00-00";

/// Line terminator for text reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Renders games as a text report.
///
/// The report starts with `"<n> results"` and a blank line, followed by one
/// block per game:
///
/// ```text
/// Event: Hoogovens
/// Site: Wijk aan Zee NED
/// Date: 1999-01-16
/// White: Kasparov, Garry (2812)
/// Black: Topalov, Veselin (2700)
/// Result: W
/// Moves: 1.e4 d6 2.d4 Nf6
/// ```
///
/// The `Moves` line is only present when `show_moves` is set. Each block is
/// followed by a blank line.
pub fn render_text(games: &[GameRecord], show_moves: bool, line_ending: LineEnding) -> String {
    let nl = line_ending.as_str();
    let mut out = format!("{} results{nl}{nl}", games.len());

    for game in games {
        let date = game
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());

        out.push_str(&format!("Event: {}{nl}", game.event));
        out.push_str(&format!("Site: {}{nl}", game.site));
        out.push_str(&format!("Date: {}{nl}", date));
        out.push_str(&format!("White: {}{nl}", player(&game.white)));
        out.push_str(&format!("Black: {}{nl}", player(&game.black)));
        out.push_str(&format!("Result: {}{nl}", game.result));
        if show_moves {
            out.push_str(&format!("Moves: {}{nl}", game.moves));
        }
        out.push_str(nl);
    }

    out
}

fn player(rating: &PlayerRating) -> String {
    format!("{} ({})", rating.name, rating.elo)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    count: usize,
    games: Vec<JsonGame<'a>>,
}

#[derive(Serialize)]
struct JsonGame<'a> {
    event: &'a str,
    site: &'a str,
    /// ISO date, or null when unknown.
    date: Option<String>,
    white: &'a PlayerRating,
    black: &'a PlayerRating,
    /// "white", "black" or "draw".
    result: Winner,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<&'a str>,
}

/// Renders games as a pretty-printed JSON document.
///
/// ```json
/// {
///   "count": 1,
///   "games": [
///     {
///       "event": "Hoogovens",
///       "site": "Wijk aan Zee NED",
///       "date": "1999-01-16",
///       "white": { "name": "Kasparov, Garry", "elo": 2812 },
///       "black": { "name": "Topalov, Veselin", "elo": 2700 },
///       "result": "white",
///       "moves": "1.e4 d6 2.d4 Nf6"
///     }
///   ]
/// }
/// ```
pub fn render_json(games: &[GameRecord], show_moves: bool) -> Result<String, BrowserError> {
    let report = JsonReport {
        count: games.len(),
        games: games
            .iter()
            .map(|game| JsonGame {
                event: &game.event,
                site: &game.site,
                date: game.date.map(|d| d.format("%Y-%m-%d").to_string()),
                white: &game.white,
                black: &game.black,
                result: game.result,
                moves: show_moves.then_some(game.moves.as_str()),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Renders games as a PGN document.
///
/// Ratings are the stored (highest) ratings, and `Date` is the event date.
///
/// # Errors
///
/// Returns [`BrowserError::Pgn`] if stored movetext cannot be read back.
pub fn render_pgn(games: &[GameRecord]) -> Result<String, BrowserError> {
    let mut out = String::new();
    for record in games {
        out.push_str(&to_chess_game(record)?.to_pgn());
    }
    Ok(out)
}

fn to_chess_game(record: &GameRecord) -> Result<ChessGame, BrowserError> {
    let moves = read_from_str(&record.moves)?
        .into_iter()
        .next()
        .map(|game| game.moves().to_vec())
        .unwrap_or_default();

    let mut tags = vec![
        ("Event".to_string(), record.event.clone()),
        ("Site".to_string(), record.site.clone()),
        (
            "Date".to_string(),
            record
                .date
                .map(|d| d.format("%Y.%m.%d").to_string())
                .unwrap_or_else(|| "????.??.??".to_string()),
        ),
        ("White".to_string(), record.white.name.clone()),
        ("Black".to_string(), record.black.name.clone()),
    ];
    for (tag, rating) in [("WhiteElo", &record.white), ("BlackElo", &record.black)] {
        if rating.elo > 0 {
            tags.push((tag.to_string(), rating.elo.to_string()));
        }
    }

    Ok(ChessGame::new(tags, moves, GameResult::from(record.result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> GameRecord {
        GameRecord {
            event: "Hoogovens".to_string(),
            site: "Wijk aan Zee NED".to_string(),
            date: NaiveDate::from_ymd_opt(1999, 1, 16),
            white: PlayerRating {
                name: "Kasparov, Garry".to_string(),
                elo: 2812,
            },
            black: PlayerRating {
                name: "Topalov, Veselin".to_string(),
                elo: 2700,
            },
            result: Winner::White,
            moves: "1.e4 d6 2.d4 Nf6".to_string(),
        }
    }

    #[test]
    fn test_text_report_with_crlf_and_moves() {
        let text = render_text(&[sample()], true, LineEnding::Crlf);
        assert_eq!(
            text,
            "1 results\r\n\r\n\
             Event: Hoogovens\r\n\
             Site: Wijk aan Zee NED\r\n\
             Date: 1999-01-16\r\n\
             White: Kasparov, Garry (2812)\r\n\
             Black: Topalov, Veselin (2700)\r\n\
             Result: W\r\n\
             Moves: 1.e4 d6 2.d4 Nf6\r\n\
             \r\n"
        );
    }

    #[test]
    fn test_text_report_hides_moves_and_shows_unknown_date() {
        let mut game = sample();
        game.date = None;
        game.result = Winner::Draw;

        let text = render_text(&[game], false, LineEnding::Lf);
        assert!(text.contains("Date: 0000-00-00\n"));
        assert!(text.contains("Result: D\n"));
        assert!(!text.contains("Moves:"));
        assert!(!text.contains('\r'));
    }

    #[test]
    fn test_text_report_empty() {
        assert_eq!(render_text(&[], true, LineEnding::Crlf), "0 results\r\n\r\n");
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&[sample()], false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 1);
        let game = &value["games"][0];
        assert_eq!(game["event"], "Hoogovens");
        assert_eq!(game["date"], "1999-01-16");
        assert_eq!(game["white"]["elo"], 2812);
        assert_eq!(game["result"], "white");
        assert!(game.get("moves").is_none());

        let json = render_json(&[sample()], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["games"][0]["moves"], "1.e4 d6 2.d4 Nf6");
    }

    #[test]
    fn test_pgn_export_reads_back() {
        let mut unrated = sample();
        unrated.black.elo = 0;
        unrated.date = None;

        let pgn = render_pgn(&[sample(), unrated]).unwrap();
        let games = read_from_str(&pgn).unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].white(), "Kasparov, Garry");
        assert_eq!(games[0].white_elo(), Some(2812));
        assert_eq!(games[0].result(), GameResult::WhiteWins);
        assert_eq!(games[0].movetext(), "1.e4 d6 2.d4 Nf6");
        assert_eq!(games[0].date(), NaiveDate::from_ymd_opt(1999, 1, 16));

        assert_eq!(games[1].black_elo(), None);
        assert_eq!(games[1].date(), None);
    }
}
