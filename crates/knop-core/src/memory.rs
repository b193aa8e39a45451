//! In-memory repository for testing.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::error::RepositoryError;
use crate::model::{
    ItemFamily, ItemId, KnowledgeNote, KnowledgeQuestion, LibraryStats, NewKnowledgeNote,
    NewKnowledgeQuestion, NewVocabularyEntry, VocabularyEntry,
};
use crate::traits::ItemRepository;

#[derive(Default)]
struct State {
    vocabulary: Vec<VocabularyEntry>,
    notes: Vec<KnowledgeNote>,
    questions: Vec<KnowledgeQuestion>,
    next_id: ItemId,
}

/// A repository held entirely in memory.
///
/// Lets the quiz core run without a database. Can be told to fail
/// sampling or `record_answer` so session abort paths can be exercised.
pub struct InMemoryRepository {
    state: Mutex<State>,
    rng: Mutex<StdRng>,
    fail_sampling: AtomicBool,
    fail_recording: AtomicBool,
    record_calls: AtomicU32,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a repository whose sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
            rng: Mutex::new(rng),
            fail_sampling: AtomicBool::new(false),
            fail_recording: AtomicBool::new(false),
            record_calls: AtomicU32::new(0),
        }
    }

    /// Make every subsequent sampling call fail.
    pub fn fail_sampling(&self, fail: bool) {
        self.fail_sampling.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent `record_answer` call fail.
    pub fn fail_recording(&self, fail: bool) {
        self.fail_recording.store(fail, Ordering::Relaxed);
    }

    /// Number of `record_answer` calls made, including failed ones.
    pub fn record_calls(&self) -> u32 {
        self.record_calls.load(Ordering::Relaxed)
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Storage("repository lock poisoned".into()))
    }

    fn sample<T: Clone>(&self, items: &[T], limit: usize) -> Result<Vec<T>> {
        if self.fail_sampling.load(Ordering::Relaxed) {
            return Err(RepositoryError::Storage("sampling disabled".into()).into());
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| RepositoryError::Storage("rng lock poisoned".into()))?;
        let amount = limit.min(items.len());
        Ok(index::sample(&mut *rng, items.len(), amount)
            .into_iter()
            .map(|i| items[i].clone())
            .collect())
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn require(value: &str, what: &str) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        Err(RepositoryError::InvalidItem(format!("{what} is required")))
    } else {
        Ok(())
    }
}

fn bump(times_shown: &mut u32, times_correct: &mut u32, was_correct: bool) {
    *times_shown += 1;
    if was_correct {
        *times_correct += 1;
    }
}

impl ItemRepository for InMemoryRepository {
    fn name(&self) -> &str {
        "memory"
    }

    fn count_all(&self) -> Result<LibraryStats> {
        let state = self.state()?;
        let mut stats = LibraryStats {
            notes: state.notes.len(),
            questions: state.questions.len(),
            ..LibraryStats::default()
        };
        for entry in &state.vocabulary {
            stats.count_language(entry.language);
        }
        Ok(stats)
    }

    fn sample_vocabulary(&self, limit: usize) -> Result<Vec<VocabularyEntry>> {
        let state = self.state()?;
        self.sample(&state.vocabulary, limit)
    }

    fn sample_questions(&self, limit: usize) -> Result<Vec<KnowledgeQuestion>> {
        let state = self.state()?;
        self.sample(&state.questions, limit)
    }

    fn record_answer(&self, family: ItemFamily, id: ItemId, was_correct: bool) -> Result<()> {
        self.record_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_recording.load(Ordering::Relaxed) {
            return Err(RepositoryError::Storage("recording disabled".into()).into());
        }

        let mut state = self.state()?;
        let not_found = RepositoryError::ItemNotFound { family, id };
        match family {
            ItemFamily::Vocabulary => {
                let entry = state
                    .vocabulary
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or(not_found)?;
                bump(&mut entry.times_shown, &mut entry.times_correct, was_correct);
            }
            ItemFamily::Knowledge => {
                let question = state
                    .questions
                    .iter_mut()
                    .find(|q| q.id == id)
                    .ok_or(not_found)?;
                bump(
                    &mut question.times_shown,
                    &mut question.times_correct,
                    was_correct,
                );
            }
        }
        Ok(())
    }

    fn insert_vocabulary(&self, entry: &NewVocabularyEntry) -> Result<ItemId> {
        require(&entry.word, "word")?;
        require(&entry.meaning, "meaning")?;
        let mut state = self.state()?;
        let id = state.next_id;
        state.next_id += 1;
        state.vocabulary.push(VocabularyEntry {
            id,
            language: entry.language,
            word: entry.word.clone(),
            phonetic: entry.phonetic.clone(),
            meaning: entry.meaning.clone(),
            example: entry.example.clone(),
            times_shown: 0,
            times_correct: 0,
        });
        Ok(id)
    }

    fn insert_note(&self, note: &NewKnowledgeNote) -> Result<ItemId> {
        require(&note.topic, "topic")?;
        let mut state = self.state()?;
        let id = state.next_id;
        state.next_id += 1;
        state.notes.push(KnowledgeNote {
            id,
            topic: note.topic.clone(),
            content: note.content.clone(),
        });
        Ok(id)
    }

    fn insert_question(&self, question: &NewKnowledgeQuestion) -> Result<ItemId> {
        require(&question.question, "question")?;
        require(&question.answer, "answer")?;
        let mut state = self.state()?;
        let id = state.next_id;
        state.next_id += 1;
        state.questions.push(KnowledgeQuestion {
            id,
            note_id: question.note_id,
            question: question.question.clone(),
            answer: question.answer.clone(),
            question_type: question.question_type.clone(),
            times_shown: 0,
            times_correct: 0,
        });
        Ok(id)
    }

    fn clear(&self) -> Result<()> {
        let mut state = self.state()?;
        state.vocabulary.clear();
        state.notes.clear();
        state.questions.clear();
        Ok(())
    }

    fn vocabulary_entry(&self, id: ItemId) -> Result<Option<VocabularyEntry>> {
        let state = self.state()?;
        Ok(state.vocabulary.iter().find(|e| e.id == id).cloned())
    }

    fn question(&self, id: ItemId) -> Result<Option<KnowledgeQuestion>> {
        let state = self.state()?;
        Ok(state.questions.iter().find(|q| q.id == id).cloned())
    }
}
