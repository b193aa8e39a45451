//! Subcommand implementations.

pub mod init;
pub mod menu;
pub mod quiz;
pub mod seed;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::Result;

use knop_store::{load_config_from, KnopConfig, SqliteRepository};

/// Loaded configuration plus the opened repository.
pub struct Library {
    pub config: KnopConfig,
    pub repo: SqliteRepository,
}

/// Load config and open the database. `database` overrides the configured path.
pub fn open_library(config_path: Option<&Path>, database: Option<PathBuf>) -> Result<Library> {
    let mut config = load_config_from(config_path)?;
    if let Some(database) = database {
        config.database_path = database;
    }
    let repo = SqliteRepository::open(&config.database_path)?;
    Ok(Library { config, repo })
}
