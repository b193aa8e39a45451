//! TOML deck parser and repository seeding.
//!
//! A deck holds the vocabulary entries, knowledge notes and questions used to
//! (re)populate a repository.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::DeckError;
use crate::model::{
    Language, NewKnowledgeNote, NewKnowledgeQuestion, NewVocabularyEntry, DEFAULT_QUESTION_TYPE,
};
use crate::traits::ItemRepository;

/// Intermediate TOML structure for parsing deck files.
#[derive(Debug, Deserialize)]
struct TomlDeck {
    #[serde(default)]
    vocabulary: Vec<TomlVocabulary>,
    #[serde(default)]
    notes: Vec<TomlNote>,
}

#[derive(Debug, Deserialize)]
struct TomlVocabulary {
    language: String,
    word: String,
    #[serde(default)]
    phonetic: Option<String>,
    meaning: String,
    #[serde(default)]
    example: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlNote {
    topic: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    question: String,
    answer: String,
    #[serde(default)]
    question_type: Option<String>,
}

/// A parsed, validated deck.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    pub vocabulary: Vec<NewVocabularyEntry>,
    pub notes: Vec<DeckNote>,
}

/// A note and the questions it owns.
#[derive(Debug, Clone)]
pub struct DeckNote {
    pub note: NewKnowledgeNote,
    /// Questions whose `note_id` is filled in at seeding time.
    pub questions: Vec<NewKnowledgeQuestion>,
}

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub english: usize,
    pub chinese: usize,
    pub notes: usize,
    pub questions: usize,
}

impl Deck {
    pub fn question_count(&self) -> usize {
        self.notes.iter().map(|n| n.questions.len()).sum()
    }
}

/// Parse a deck file.
pub fn parse_deck(path: &Path) -> Result<Deck> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read deck file: {}", path.display()))?;

    parse_deck_str(&content)
        .with_context(|| format!("invalid deck file: {}", path.display()))
}

/// Parse a deck from a TOML string.
pub fn parse_deck_str(content: &str) -> Result<Deck> {
    let parsed: TomlDeck = toml::from_str(content).context("failed to parse deck TOML")?;

    let vocabulary = parsed
        .vocabulary
        .into_iter()
        .enumerate()
        .map(|(index, v)| -> Result<NewVocabularyEntry> {
            let index = index + 1;
            let language: Language = v
                .language
                .parse()
                .map_err(|reason: String| DeckError::UnknownLanguage { index, reason })?;
            if v.word.trim().is_empty() {
                return Err(DeckError::EmptyVocabularyField {
                    index,
                    field: "word",
                }
                .into());
            }
            if v.meaning.trim().is_empty() {
                return Err(DeckError::EmptyVocabularyField {
                    index,
                    field: "meaning",
                }
                .into());
            }
            Ok(NewVocabularyEntry {
                language,
                word: v.word,
                phonetic: v.phonetic.filter(|p| !p.trim().is_empty()),
                meaning: v.meaning,
                example: v.example.filter(|e| !e.trim().is_empty()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let notes = parsed
        .notes
        .into_iter()
        .enumerate()
        .map(|(note_index, n)| -> Result<DeckNote> {
            let note_index = note_index + 1;
            if n.topic.trim().is_empty() {
                return Err(DeckError::EmptyTopic { index: note_index }.into());
            }
            let questions = n
                .questions
                .into_iter()
                .enumerate()
                .map(|(index, q)| -> Result<NewKnowledgeQuestion, DeckError> {
                    let index = index + 1;
                    for (field, value) in [("question", &q.question), ("answer", &q.answer)] {
                        if value.trim().is_empty() {
                            return Err(DeckError::EmptyQuestionField {
                                note: note_index,
                                index,
                                field,
                            });
                        }
                    }
                    Ok(NewKnowledgeQuestion {
                        note_id: None,
                        question: q.question,
                        answer: q.answer,
                        question_type: q
                            .question_type
                            .unwrap_or_else(|| DEFAULT_QUESTION_TYPE.to_string()),
                    })
                })
                .collect::<Result<Vec<_>, DeckError>>()?;
            Ok(DeckNote {
                note: NewKnowledgeNote {
                    topic: n.topic,
                    content: n.content,
                },
                questions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Deck { vocabulary, notes })
}

/// Reset the repository and insert every item in the deck.
pub fn seed_deck(repo: &dyn ItemRepository, deck: &Deck) -> Result<SeedSummary> {
    repo.clear().context("failed to clear repository")?;

    let mut summary = SeedSummary::default();

    for entry in &deck.vocabulary {
        repo.insert_vocabulary(entry)
            .with_context(|| format!("failed to insert word '{}'", entry.word))?;
        match entry.language {
            Language::English => summary.english += 1,
            Language::Chinese => summary.chinese += 1,
        }
    }

    for deck_note in &deck.notes {
        let note_id = repo
            .insert_note(&deck_note.note)
            .with_context(|| format!("failed to insert note '{}'", deck_note.note.topic))?;
        summary.notes += 1;
        for question in &deck_note.questions {
            let question = NewKnowledgeQuestion {
                note_id: Some(note_id),
                ..question.clone()
            };
            repo.insert_question(&question)
                .with_context(|| format!("failed to insert question '{}'", question.question))?;
            summary.questions += 1;
        }
    }

    tracing::info!(
        backend = repo.name(),
        english = summary.english,
        chinese = summary.chinese,
        notes = summary.notes,
        questions = summary.questions,
        "repository seeded"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRepository;

    const SMALL_DECK: &str = r#"
[[vocabulary]]
language = "en"
word = "apple"
meaning = "quả táo"
example = "I eat an apple every day"

[[vocabulary]]
language = "cn"
word = "你好"
phonetic = "nǐ hǎo"
meaning = "xin chào"

[[notes]]
topic = "JavaScript Closures"
content = "A closure is a function that keeps access to its outer scope."

[[notes.questions]]
question = "Closures are created when?"
answer = "Every time a function is created"

[[notes.questions]]
question = "Can closures access outer variables after the outer function returns?"
answer = "Yes"
question_type = "yes_no"
"#;

    #[test]
    fn parse_small_deck() {
        let deck = parse_deck_str(SMALL_DECK).unwrap();
        assert_eq!(deck.vocabulary.len(), 2);
        assert_eq!(deck.vocabulary[1].language, Language::Chinese);
        assert_eq!(deck.vocabulary[1].phonetic.as_deref(), Some("nǐ hǎo"));
        assert!(deck.vocabulary[1].example.is_none());
        assert_eq!(deck.notes.len(), 1);
        assert_eq!(deck.question_count(), 2);
        assert_eq!(deck.notes[0].questions[0].question_type, "open");
        assert_eq!(deck.notes[0].questions[1].question_type, "yes_no");
    }

    #[test]
    fn empty_meaning_is_rejected() {
        let err = parse_deck_str(
            r#"
[[vocabulary]]
language = "en"
word = "book"
meaning = ""
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeckError>(),
            Some(DeckError::EmptyVocabularyField {
                index: 1,
                field: "meaning"
            })
        ));
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = parse_deck_str(
            r#"
[[vocabulary]]
language = "fr"
word = "pomme"
meaning = "quả táo"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown language"));
    }

    #[test]
    fn empty_answer_is_rejected() {
        let err = parse_deck_str(
            r#"
[[notes]]
topic = "Rust"

[[notes.questions]]
question = "What is ownership?"
answer = " "
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeckError>(),
            Some(DeckError::EmptyQuestionField { field: "answer", .. })
        ));
    }

    #[test]
    fn seeding_replaces_contents_and_links_questions() {
        let repo = InMemoryRepository::with_seed(1);
        let deck = parse_deck_str(SMALL_DECK).unwrap();

        seed_deck(&repo, &deck).unwrap();
        let summary = seed_deck(&repo, &deck).unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                english: 1,
                chinese: 1,
                notes: 1,
                questions: 2
            }
        );

        let stats = repo.count_all().unwrap();
        assert_eq!(stats.english, 1);
        assert_eq!(stats.chinese, 1);
        assert_eq!(stats.questions, 2);

        for question in repo.sample_questions(10).unwrap() {
            assert!(question.note_id.is_some());
        }
    }

    #[test]
    fn parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_deck(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read deck file"));
    }
}
