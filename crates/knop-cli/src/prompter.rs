//! Console front end for quiz sessions.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use knop_core::model::{QuizItem, QuizSource, DEFAULT_QUESTION_TYPE};
use knop_core::scoring::SessionResult;
use knop_core::traits::QuizPrompter;

pub const RULE_WIDTH: usize = 60;

/// Whether a typed response counts as "yes".
pub fn is_yes(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Read one trimmed line; EOF is an error.
pub fn read_trimmed_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from input")?;
    anyhow::ensure!(read > 0, "input stream closed");
    Ok(line.trim().to_string())
}

/// Prompts on a writer and reads responses from a reader, one line each.
pub struct ConsolePrompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> ConsolePrompter<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        read_trimmed_line(&mut *self.input)
    }
}

impl<R: BufRead, W: Write> QuizPrompter for ConsolePrompter<'_, R, W> {
    fn show_question(&mut self, position: usize, total: usize, item: &QuizItem) -> Result<()> {
        writeln!(self.output, "\nQuestion {position}/{total}")?;
        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;
        match &item.source {
            QuizSource::Knowledge { question_type, .. }
                if question_type != DEFAULT_QUESTION_TYPE =>
            {
                writeln!(self.output, "? [{question_type}] {}", item.question)?
            }
            _ => writeln!(self.output, "? {}", item.question)?,
        }
        if let Some(hint) = &item.hint {
            writeln!(self.output, "   Example: {hint}")?;
        }
        Ok(())
    }

    fn read_answer(&mut self) -> Result<String> {
        self.prompt("\nYour answer: ")
    }

    fn reveal_answer(&mut self, item: &QuizItem) -> Result<()> {
        writeln!(self.output, "\nCorrect answer: {}", item.answer)?;
        Ok(())
    }

    fn read_judgment(&mut self) -> Result<bool> {
        let response = self.prompt("Did you answer correctly? (y/n): ")?;
        Ok(is_yes(&response))
    }

    fn show_feedback(&mut self, correct: bool) -> Result<()> {
        if correct {
            writeln!(self.output, "Great job!")?;
        } else {
            writeln!(self.output, "Better luck next time!")?;
        }
        Ok(())
    }

    fn show_empty(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "No questions available. Run `knop seed` to add sample data first."
        )?;
        Ok(())
    }

    fn show_summary(&mut self, result: &SessionResult) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{rule}")?;
        writeln!(self.output, "QUIZ RESULTS")?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "Correct: {}/{}", result.correct, result.total)?;
        writeln!(self.output, "Accuracy: {:.1}%", result.accuracy)?;
        writeln!(self.output, "Rating: {}", result.band)?;
        writeln!(self.output, "{}", result.band.message())?;
        writeln!(self.output, "{rule}")?;
        Ok(())
    }
}
