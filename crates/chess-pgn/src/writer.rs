//! PGN export for chess games.
//!
//! Games are written in the export format most chess software expects: the
//! Seven Tag Roster first, then any other tags, a blank line, and movetext
//! wrapped at 80 columns ending with the result terminator.

use std::io::Write;

use crate::game::ChessGame;

const SEVEN_TAG_ROSTER: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

const LINE_WIDTH: usize = 80;

/// Writes a game in PGN export format, followed by a blank line.
///
/// Missing roster tags are written as `"?"` (`"????.??.??"` for the date).
/// The `Result` tag always reflects [`ChessGame::result`].
///
/// # Example
///
/// ```
/// use chess_pgn::{read_from_str, write_pgn};
///
/// let games = read_from_str("[White \"A\"]\n[Black \"B\"]\n\n1. e4 e5 1/2-1/2").unwrap();
/// let mut out = Vec::new();
/// write_pgn(&mut out, &games[0]).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("[Result \"1/2-1/2\"]"));
/// assert!(text.contains("1. e4 e5 1/2-1/2"));
/// ```
pub fn write_pgn<W: Write>(out: &mut W, game: &ChessGame) -> std::io::Result<()> {
    out.write_all(game.to_pgn().as_bytes())
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn push_tag(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!("[{} \"{}\"]\n", name, escape(value)));
}

impl ChessGame {
    /// Returns the game in PGN export format, as written by [`write_pgn`].
    pub fn to_pgn(&self) -> String {
        let mut out = String::new();
        for name in SEVEN_TAG_ROSTER {
            let value = match name {
                "Result" => self.result().as_str(),
                "Date" => self.tag("Date").unwrap_or("????.??.??"),
                _ => self.tag(name).unwrap_or("?"),
            };
            push_tag(&mut out, name, value);
        }
        for (name, value) in self.tags() {
            if !SEVEN_TAG_ROSTER.contains(&name.as_str()) {
                push_tag(&mut out, name, value);
            }
        }
        out.push('\n');

        let mut tokens = Vec::with_capacity(self.moves().len() * 3 / 2 + 1);
        for (i, mv) in self.moves().iter().enumerate() {
            if i % 2 == 0 {
                tokens.push(format!("{}.", i / 2 + 1));
            }
            tokens.push(mv.clone());
        }
        tokens.push(self.result().as_str().to_string());

        let mut line = String::new();
        for token in tokens {
            if !line.is_empty() && line.len() + 1 + token.len() > LINE_WIDTH {
                out.push_str(&line);
                out.push('\n');
                line.clear();
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&token);
        }
        out.push_str(&line);
        out.push_str("\n\n");
        out
    }
}
