//! Quiz session runner.
//!
//! Drives one quiz end to end: assemble, present each item, wait for the
//! user's answer and self-judgment, record the judgment, then score.
//! Strictly sequential; the update for item k completes before item k+1 is
//! shown.

use anyhow::Context;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::assembler::assemble_quiz;
use crate::error::SessionError;
use crate::report::{AnswerRecord, SessionReport};
use crate::scoring::score;
use crate::traits::{ItemRepository, QuizPrompter};

/// How a session ended, short of a failure.
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    /// The repository had nothing to quiz. Not an error.
    Empty,
    Completed(SessionReport),
}

impl SessionOutcome {
    pub fn report(&self) -> Option<&SessionReport> {
        match self {
            SessionOutcome::Empty => None,
            SessionOutcome::Completed(report) => Some(report),
        }
    }
}

/// Runs quiz sessions against an injected repository.
pub struct SessionRunner<'a> {
    repo: &'a dyn ItemRepository,
}

impl<'a> SessionRunner<'a> {
    pub fn new(repo: &'a dyn ItemRepository) -> Self {
        Self { repo }
    }

    /// Run a session of up to `count` items.
    ///
    /// Any repository or prompter failure aborts the session immediately;
    /// answers recorded before the failure stay recorded.
    pub fn run<R: Rng + ?Sized>(
        &self,
        count: usize,
        prompter: &mut dyn QuizPrompter,
        rng: &mut R,
    ) -> Result<SessionOutcome, SessionError> {
        let started_at = Utc::now();
        let quiz = assemble_quiz(self.repo, count, rng).map_err(SessionError::Repository)?;

        if quiz.is_empty() {
            tracing::info!(requested = count, "no content available, nothing to quiz");
            prompter.show_empty().map_err(SessionError::Interaction)?;
            return Ok(SessionOutcome::Empty);
        }

        let session_id = Uuid::new_v4();
        let total = quiz.len();
        tracing::info!(%session_id, requested = count, total, "quiz session started");

        let mut correct = 0usize;
        let mut answers = Vec::with_capacity(total);

        for (index, item) in quiz.iter().enumerate() {
            prompter
                .show_question(index + 1, total, item)
                .map_err(SessionError::Interaction)?;
            let response = prompter.read_answer().map_err(SessionError::Interaction)?;
            prompter
                .reveal_answer(item)
                .map_err(SessionError::Interaction)?;
            let judged_correct = prompter.read_judgment().map_err(SessionError::Interaction)?;
            prompter
                .show_feedback(judged_correct)
                .map_err(SessionError::Interaction)?;

            self.repo
                .record_answer(item.family(), item.source_id(), judged_correct)
                .with_context(|| {
                    format!(
                        "failed to record answer for {} item {}",
                        item.family(),
                        item.source_id()
                    )
                })
                .map_err(SessionError::Repository)?;

            tracing::debug!(
                family = %item.family(),
                id = item.source_id(),
                correct = judged_correct,
                "answer recorded"
            );

            if judged_correct {
                correct += 1;
            }
            answers.push(AnswerRecord {
                family: item.family(),
                source_id: item.source_id(),
                question: item.question.clone(),
                response,
                correct: judged_correct,
            });
        }

        let result = score(correct, total);
        prompter
            .show_summary(&result)
            .map_err(SessionError::Interaction)?;

        tracing::info!(
            %session_id,
            correct,
            total,
            accuracy = result.accuracy,
            band = %result.band,
            "quiz session finished"
        );

        Ok(SessionOutcome::Completed(SessionReport {
            id: session_id,
            started_at,
            finished_at: Utc::now(),
            requested: count,
            answers,
            result,
        }))
    }
}
