//! Quiz item construction.
//!
//! Vocabulary entries are rendered under a randomly chosen presentation mode;
//! knowledge questions are copied through unchanged.

use rand::Rng;

use crate::model::{KnowledgeQuestion, PresentationMode, QuizItem, QuizSource, VocabularyEntry};

/// Pick a presentation mode uniformly at random.
pub fn choose_mode<R: Rng + ?Sized>(rng: &mut R) -> PresentationMode {
    if rng.random_bool(0.5) {
        PresentationMode::WordToMeaning
    } else {
        PresentationMode::MeaningToWord
    }
}

/// Build a quiz item from a vocabulary entry under a random mode.
pub fn build_vocabulary_item<R: Rng + ?Sized>(entry: &VocabularyEntry, rng: &mut R) -> QuizItem {
    render_vocabulary(entry, choose_mode(rng))
}

/// Render a vocabulary entry under a specific mode.
pub fn render_vocabulary(entry: &VocabularyEntry, mode: PresentationMode) -> QuizItem {
    let (question, answer) = match mode {
        PresentationMode::WordToMeaning => {
            let question = match &entry.phonetic {
                Some(phonetic) if !phonetic.is_empty() => {
                    format!("What does \"{}\" ({phonetic}) mean?", entry.word)
                }
                _ => format!("What does \"{}\" mean?", entry.word),
            };
            (question, entry.meaning.clone())
        }
        PresentationMode::MeaningToWord => (
            format!(
                "Translate into {}: {}",
                entry.language.display_name(),
                entry.meaning
            ),
            entry.word.clone(),
        ),
    };

    QuizItem {
        source: QuizSource::Vocabulary { id: entry.id, mode },
        question,
        answer,
        hint: entry.example.clone().filter(|e| !e.is_empty()),
    }
}

/// Pass a knowledge question through as a quiz item.
pub fn build_knowledge_item(question: &KnowledgeQuestion) -> QuizItem {
    QuizItem {
        source: QuizSource::Knowledge {
            id: question.id,
            question_type: question.question_type.clone(),
        },
        question: question.question.clone(),
        answer: question.answer.clone(),
        hint: None,
    }
}
