//! Reading PGN documents into [`ChessGame`] records.
//!
//! Tokenizing is done by `pgn-reader`. This module collects its callbacks
//! into games and deals with the input quirks found in real files: a leading
//! byte order mark and tag values in ISO-8859-1 rather than UTF-8.

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use pgn_reader::{BufferedReader, Color, Outcome, RawHeader, SanPlus, Skip, Visitor};
use thiserror::Error;

use crate::game::ChessGame;
use crate::result::GameResult;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Errors that can occur when reading PGN text.
#[derive(Debug, Error)]
pub enum PgnError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read PGN input: {0}")]
    Read(#[from] io::Error),
}

/// Collects the callbacks for one game.
///
/// A tag whose name was already seen in the current header section starts a
/// new game. The finished, header-only game is parked in `split` until the
/// reader hands it out.
#[derive(Default)]
struct GameCollector {
    tags: Vec<(String, String)>,
    moves: Vec<String>,
    terminator: Option<GameResult>,
    split: Vec<ChessGame>,
}

impl GameCollector {
    fn take_game(&mut self) -> ChessGame {
        ChessGame::from_parts(
            std::mem::take(&mut self.tags),
            std::mem::take(&mut self.moves),
            self.terminator.take(),
        )
    }
}

impl Visitor for GameCollector {
    type Result = ChessGame;

    fn begin_game(&mut self) {
        self.tags.clear();
        self.moves.clear();
        self.terminator = None;
    }

    fn header(&mut self, key: &[u8], value: RawHeader<'_>) {
        let name = decode_text(key);
        if self.moves.is_empty() && self.tags.iter().any(|(n, _)| *n == name) {
            let game = self.take_game();
            self.split.push(game);
        }
        self.tags.push((name, decode_text(&value.decode())));
    }

    fn san(&mut self, san_plus: SanPlus) {
        self.moves.push(san_plus.to_string());
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true)
    }

    fn outcome(&mut self, outcome: Option<Outcome>) {
        self.terminator = Some(match outcome {
            Some(Outcome::Decisive {
                winner: Color::White,
            }) => GameResult::WhiteWins,
            Some(Outcome::Decisive {
                winner: Color::Black,
            }) => GameResult::BlackWins,
            Some(Outcome::Draw) => GameResult::Draw,
            None => GameResult::Unknown,
        });
    }

    fn end_game(&mut self) -> Self::Result {
        self.take_game()
    }
}

/// Decodes UTF-8, falling back to ISO-8859-1 (the PGN standard's charset).
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Iterator over the games of a PGN document.
///
/// Unreadable movetext tokens are skipped rather than rejected, and
/// variations are discarded. An empty section (no tags and no moves) is not
/// a game.
///
/// # Example
///
/// ```
/// use chess_pgn::{GameResult, PgnReader};
///
/// let pgn = "[White \"Morphy\"]\n[Black \"Duke\"]\n\n1. e4 e5 2. Nf3 d6 1-0\n";
/// let games: Vec<_> = PgnReader::new(pgn).collect::<Result<_, _>>().unwrap();
/// assert_eq!(games[0].white(), "Morphy");
/// assert_eq!(games[0].result(), GameResult::WhiteWins);
/// ```
pub struct PgnReader<'a> {
    reader: BufferedReader<&'a [u8]>,
    collector: GameCollector,
    queue: VecDeque<ChessGame>,
    done: bool,
}

impl<'a> PgnReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::from_bytes(input.as_bytes())
    }

    /// Reads raw file contents. A UTF-8 byte order mark is skipped.
    pub fn from_bytes(input: &'a [u8]) -> Self {
        let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
        Self {
            reader: BufferedReader::new(input),
            collector: GameCollector::default(),
            queue: VecDeque::new(),
            done: false,
        }
    }
}

impl Iterator for PgnReader<'_> {
    type Item = Result<ChessGame, PgnError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(game) = self.queue.pop_front() {
                return Some(Ok(game));
            }
            if self.done {
                return None;
            }

            match self.reader.read_game(&mut self.collector) {
                Ok(Some(game)) => {
                    self.queue.extend(self.collector.split.drain(..));
                    if !game.tags().is_empty() || !game.moves().is_empty() {
                        self.queue.push_back(game);
                    }
                }
                Ok(None) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(PgnError::Read(e)));
                }
            }
        }
    }
}

/// Reads every game in a PGN document.
pub fn read_from_str(input: &str) -> Result<Vec<ChessGame>, PgnError> {
    PgnReader::new(input).collect()
}

/// Reads every game in a PGN file.
///
/// The file may be UTF-8 (with or without a byte order mark) or ISO-8859-1.
///
/// # Errors
///
/// Returns [`PgnError::Io`] if the file cannot be read.
pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<ChessGame>, PgnError> {
    let path = path.as_ref();
    let content = std::fs::read(path).map_err(|source| PgnError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PgnReader::from_bytes(&content).collect()
}
