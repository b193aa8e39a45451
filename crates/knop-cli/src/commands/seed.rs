//! The `knop seed` command.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use knop_core::deck::{parse_deck, seed_deck, SeedSummary};
use knop_store::decks::configured_deck;

pub fn execute(
    config_path: Option<&Path>,
    database: Option<PathBuf>,
    deck_path: Option<PathBuf>,
) -> Result<()> {
    let library = super::open_library(config_path, database)?;

    let deck = match &deck_path {
        Some(path) => parse_deck(path)?,
        None => configured_deck(&library.config)?,
    };
    let summary = seed_deck(&library.repo, &deck)?;

    print_seed_summary(&summary, &mut std::io::stdout().lock())
}

pub fn print_seed_summary<W: Write>(summary: &SeedSummary, out: &mut W) -> Result<()> {
    writeln!(out, "Seeded library:")?;
    writeln!(out, "  - {} English words", summary.english)?;
    writeln!(out, "  - {} Chinese words", summary.chinese)?;
    writeln!(
        out,
        "  - {} knowledge notes with {} questions",
        summary.notes, summary.questions
    )?;
    Ok(())
}
