//! The `knop quiz` command.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use knop_core::session::SessionRunner;
use knop_core::traits::ItemRepository;
use knop_store::decks::seed_if_empty;

use super::seed::print_seed_summary;
use crate::prompter::{ConsolePrompter, RULE_WIDTH};

pub fn execute(
    config_path: Option<&Path>,
    database: Option<PathBuf>,
    count: Option<usize>,
    save: Option<PathBuf>,
) -> Result<()> {
    let library = super::open_library(config_path, database)?;
    let count = count.unwrap_or(library.config.default_quiz_size);
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let mut input = std::io::stdin().lock();
    let mut output = std::io::stdout().lock();

    if let Some(summary) = seed_if_empty(&library.repo, &library.config)? {
        writeln!(output, "Library was empty.")?;
        print_seed_summary(&summary, &mut output)?;
    }

    run_quiz(
        &library.repo,
        count,
        &mut input,
        &mut output,
        save.as_deref(),
    )
}

/// Run one interactive session and optionally save its report.
pub fn run_quiz<R: BufRead, W: Write>(
    repo: &dyn ItemRepository,
    count: usize,
    input: &mut R,
    output: &mut W,
    save: Option<&Path>,
) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(output, "\n{rule}")?;
    writeln!(output, "KNOP QUIZ TIME! ({count} questions)")?;
    writeln!(output, "{rule}")?;

    let outcome = {
        let mut prompter = ConsolePrompter::new(input, output);
        SessionRunner::new(repo).run(count, &mut prompter, &mut rand::rng())?
    };

    if let (Some(report), Some(path)) = (outcome.report(), save) {
        report.save_json(path)?;
        eprintln!(
            "Session saved to: {} ({:.1}s)",
            path.display(),
            report.duration_secs()
        );
    }

    Ok(())
}
