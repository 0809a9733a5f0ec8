//! Chess Browser - PGN game collections in a queryable database.
//!
//! This crate uploads games parsed by [`chess_pgn`] into SQLite and searches
//! them with player, opening, winner and date filters.
//!
//! # Modules
//!
//! - [`db`] - Connection setup and schema for events, players and games
//! - [`repo`] - Insert-or-update helpers and the game search repository
//! - [`upload`] - Uploading parsed PGN files with progress reporting
//! - [`query`] - Typed search filters compiled to parameterized SQL
//! - [`report`] - Text, JSON and PGN rendering of search results
//! - [`progress`] - Progress events passed from the upload worker
//! - [`config`] - TOML configuration file loading

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod progress;
pub mod query;
pub mod repo;
pub mod report;
pub mod upload;

pub use error::BrowserError;
