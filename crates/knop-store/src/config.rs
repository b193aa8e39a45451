//! knop configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level knop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnopConfig {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Quiz length used when none is given.
    #[serde(default = "default_quiz_size")]
    pub default_quiz_size: usize,
    /// Seed the deck into an empty library before use.
    #[serde(default = "default_true")]
    pub auto_seed: bool,
    /// Deck used for seeding instead of the built-in sample deck.
    #[serde(default)]
    pub deck_path: Option<PathBuf>,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("knop.db")
}
fn default_quiz_size() -> usize {
    5
}
fn default_true() -> bool {
    true
}

impl Default for KnopConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            default_quiz_size: default_quiz_size(),
            auto_seed: true,
            deck_path: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `knop.toml` in the current directory
/// 2. `~/.config/knop/config.toml`
///
/// Environment variable override: `KNOP_DB_PATH`.
pub fn load_config_from(path: Option<&Path>) -> Result<KnopConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("knop.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<KnopConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => KnopConfig::default(),
    };

    if let Ok(db_path) = std::env::var("KNOP_DB_PATH") {
        if !db_path.is_empty() {
            config.database_path = PathBuf::from(db_path);
        }
    }

    config.database_path = resolve_path(&config.database_path);
    config.deck_path = config.deck_path.as_deref().map(resolve_path);

    anyhow::ensure!(
        config.default_quiz_size >= 1,
        "default_quiz_size must be at least 1"
    );

    tracing::debug!(
        source = ?config_path,
        database = %config.database_path.display(),
        "configuration loaded"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("knop"))
}
