//! Portable Game Notation (PGN) reading and writing.
//!
//! This crate turns PGN text into [`ChessGame`] records and back:
//! - [`PgnReader`] iterates over the games in a PGN document
//! - [`read_from_str`] and [`read_from_file`] collect a whole document
//! - [`write_pgn`] exports a game in the standard export format
//!
//! Movetext is tokenized by `pgn-reader`. Moves are kept as SAN strings and
//! no board is replayed.

mod game;
mod reader;
mod result;
mod writer;

pub use game::{parse_date, parse_elo, ChessGame};
pub use reader::{read_from_file, read_from_str, PgnError, PgnReader};
pub use result::GameResult;
pub use writer::write_pgn;
