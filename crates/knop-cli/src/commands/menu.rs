//! The interactive `knop menu`.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use knop_core::deck::seed_deck;
use knop_store::decks::{configured_deck, seed_if_empty};

use super::quiz::run_quiz;
use super::seed::print_seed_summary;
use super::stats::print_stats;
use super::Library;
use crate::prompter::{read_trimmed_line, RULE_WIDTH};

pub fn execute(config_path: Option<&Path>, database: Option<PathBuf>) -> Result<()> {
    let library = super::open_library(config_path, database)?;
    let mut input = std::io::stdin().lock();
    let mut output = std::io::stdout().lock();
    run_menu(&library, &mut input, &mut output)
}

/// Loop over menu choices until "exit" or end of input.
pub fn run_menu<R: BufRead, W: Write>(
    library: &Library,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    if let Some(summary) = seed_if_empty(&library.repo, &library.config)? {
        writeln!(output, "Library was empty.")?;
        print_seed_summary(&summary, output)?;
    }

    loop {
        print_menu(output)?;
        write!(output, "Choose an option: ")?;
        output.flush()?;

        let choice = match read_trimmed_line(input) {
            Ok(choice) => choice,
            Err(_) => {
                tracing::debug!("input closed, leaving menu");
                writeln!(output)?;
                return Ok(());
            }
        };

        match choice.as_str() {
            "1" => print_stats(&library.repo, output)?,
            "2" => {
                let deck = configured_deck(&library.config)?;
                let summary = seed_deck(&library.repo, &deck)?;
                print_seed_summary(&summary, output)?;
            }
            "3" => run_quiz(&library.repo, 3, input, output, None)?,
            "4" => run_quiz(&library.repo, 5, input, output, None)?,
            "5" => run_quiz(&library.repo, 10, input, output, None)?,
            "6" => {
                writeln!(output, "Goodbye!")?;
                return Ok(());
            }
            other => writeln!(output, "Unknown option: {other}")?,
        }
    }
}

fn print_menu<W: Write>(output: &mut W) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(output, "\n{rule}")?;
    writeln!(output, "KNOP")?;
    writeln!(output, "{rule}")?;
    writeln!(output, "1. Show library stats")?;
    writeln!(output, "2. Reseed library")?;
    writeln!(output, "3. Quick quiz (3 questions)")?;
    writeln!(output, "4. Standard quiz (5 questions)")?;
    writeln!(output, "5. Long quiz (10 questions)")?;
    writeln!(output, "6. Exit")?;
    Ok(())
}
