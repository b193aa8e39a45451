//! knop-store: SQLite storage and configuration.
//!
//! Implements the `ItemRepository` trait on top of a local SQLite database
//! and loads the knop configuration and seed decks.

pub mod config;
pub mod decks;
pub mod sqlite;

pub use config::{load_config_from, KnopConfig};
pub use sqlite::SqliteRepository;
