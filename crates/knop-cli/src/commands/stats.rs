//! The `knop stats` command.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{Cell, Table};

use knop_core::traits::ItemRepository;
use knop_store::decks::seed_if_empty;

use super::seed::print_seed_summary;

pub fn execute(config_path: Option<&Path>, database: Option<PathBuf>) -> Result<()> {
    let library = super::open_library(config_path, database)?;
    let mut out = std::io::stdout().lock();

    if let Some(summary) = seed_if_empty(&library.repo, &library.config)? {
        writeln!(out, "Library was empty.")?;
        print_seed_summary(&summary, &mut out)?;
    }

    print_stats(&library.repo, &mut out)
}

pub fn print_stats<W: Write>(repo: &dyn ItemRepository, out: &mut W) -> Result<()> {
    let stats = repo.count_all()?;

    let mut table = Table::new();
    table.set_header(vec!["Library", "Count"]);
    for (label, count) in [
        ("English words", stats.english),
        ("Chinese words", stats.chinese),
        ("Knowledge notes", stats.notes),
        ("Questions", stats.questions),
        ("Total quizzable", stats.quizzable()),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }

    writeln!(out, "{table}")?;
    Ok(())
}
