//! Repository modules for database operations.
//!
//! The insert helpers take a plain [`rusqlite::Connection`] so an upload can
//! run them inside one transaction.

pub mod events;
pub mod games;
pub mod players;

pub use games::{GameRepo, NewGame};
