//! Core trait definitions for item storage and quiz interaction.
//!
//! `ItemRepository` is implemented by `knop-store` (SQLite) and by
//! [`crate::memory::InMemoryRepository`]. `QuizPrompter` is implemented by the
//! CLI's console front end.

use anyhow::Result;

use crate::model::{
    ItemFamily, ItemId, KnowledgeQuestion, LibraryStats, NewKnowledgeNote, NewKnowledgeQuestion,
    NewVocabularyEntry, QuizItem, VocabularyEntry,
};
use crate::scoring::SessionResult;

// ---------------------------------------------------------------------------
// Item repository trait
// ---------------------------------------------------------------------------

/// Durable storage for vocabulary entries, knowledge notes and questions.
///
/// Every call completes before it returns; the quiz core never issues two
/// operations at once, so implementations need no locking beyond that.
pub trait ItemRepository {
    /// Human-readable backend name (e.g. "sqlite").
    fn name(&self) -> &str;

    /// Count stored items per kind.
    fn count_all(&self) -> Result<LibraryStats>;

    /// Draw up to `limit` vocabulary entries uniformly, without replacement.
    fn sample_vocabulary(&self, limit: usize) -> Result<Vec<VocabularyEntry>>;

    /// Draw up to `limit` knowledge questions uniformly, without replacement.
    fn sample_questions(&self, limit: usize) -> Result<Vec<KnowledgeQuestion>>;

    /// Increment `times_shown` by one, and `times_correct` by one iff
    /// `was_correct`, as a single atomic update.
    ///
    /// Fails with [`crate::error::RepositoryError::ItemNotFound`] for an
    /// unknown id.
    fn record_answer(&self, family: ItemFamily, id: ItemId, was_correct: bool) -> Result<()>;

    fn insert_vocabulary(&self, entry: &NewVocabularyEntry) -> Result<ItemId>;

    fn insert_note(&self, note: &NewKnowledgeNote) -> Result<ItemId>;

    fn insert_question(&self, question: &NewKnowledgeQuestion) -> Result<ItemId>;

    /// Delete every stored item. Used only when reseeding.
    fn clear(&self) -> Result<()>;

    fn vocabulary_entry(&self, id: ItemId) -> Result<Option<VocabularyEntry>>;

    fn question(&self, id: ItemId) -> Result<Option<KnowledgeQuestion>>;
}

// ---------------------------------------------------------------------------
// Quiz prompter trait
// ---------------------------------------------------------------------------

/// The interaction surface of a quiz session.
///
/// `read_answer` and `read_judgment` block until the user responds; there is
/// no timeout.
pub trait QuizPrompter {
    /// Present a question and its hint, if any. `position` is 1-based.
    fn show_question(&mut self, position: usize, total: usize, item: &QuizItem) -> Result<()>;

    /// Wait for the user's free-text answer.
    fn read_answer(&mut self) -> Result<String>;

    /// Reveal the stored answer.
    fn reveal_answer(&mut self, item: &QuizItem) -> Result<()>;

    /// Wait for the user's own verdict on whether they were right.
    fn read_judgment(&mut self) -> Result<bool>;

    /// Acknowledge a judgment.
    fn show_feedback(&mut self, _correct: bool) -> Result<()> {
        Ok(())
    }

    /// Nothing was available to quiz.
    fn show_empty(&mut self) -> Result<()>;

    fn show_summary(&mut self, result: &SessionResult) -> Result<()>;
}
