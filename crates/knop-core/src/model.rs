//! Core data model types for knop.
//!
//! These are the stored item families (vocabulary entries, knowledge notes and
//! their questions) and the ephemeral quiz items built from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Question type assigned to knowledge questions that don't specify one.
pub const DEFAULT_QUESTION_TYPE: &str = "open";

/// Repository-assigned item identifier.
pub type ItemId = i64;

/// Source language of a vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "cn")]
    Chinese,
}

impl Language {
    /// Short tag as stored in the repository.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "cn",
        }
    }

    /// Name used in rendered question text.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "Chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "cn" | "zh" | "chinese" => Ok(Language::Chinese),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// One of the two quizzable content categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemFamily {
    Vocabulary,
    Knowledge,
}

impl fmt::Display for ItemFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemFamily::Vocabulary => write!(f, "vocabulary"),
            ItemFamily::Knowledge => write!(f, "knowledge"),
        }
    }
}

/// A stored vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: ItemId,
    pub language: Language,
    /// The word or phrase in its source language.
    pub word: String,
    /// Phonetic annotation (e.g. pinyin), present only for some languages.
    #[serde(default)]
    pub phonetic: Option<String>,
    /// Native-language meaning.
    pub meaning: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub times_shown: u32,
    #[serde(default)]
    pub times_correct: u32,
}

/// A topical note that owns knowledge questions. Never quizzed directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeNote {
    pub id: ItemId,
    pub topic: String,
    pub content: String,
}

/// A stored question/answer pair about some knowledge note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeQuestion {
    pub id: ItemId,
    /// Owning note, if any.
    #[serde(default)]
    pub note_id: Option<ItemId>,
    pub question: String,
    pub answer: String,
    /// Free-form type tag, shown for display only.
    #[serde(default = "default_question_type")]
    pub question_type: String,
    #[serde(default)]
    pub times_shown: u32,
    #[serde(default)]
    pub times_correct: u32,
}

fn default_question_type() -> String {
    DEFAULT_QUESTION_TYPE.to_string()
}

/// Input for inserting a vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVocabularyEntry {
    pub language: Language,
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    pub meaning: String,
    #[serde(default)]
    pub example: Option<String>,
}

/// Input for inserting a knowledge note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewKnowledgeNote {
    pub topic: String,
    pub content: String,
}

/// Input for inserting a knowledge question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewKnowledgeQuestion {
    #[serde(default)]
    pub note_id: Option<ItemId>,
    pub question: String,
    pub answer: String,
    #[serde(default = "default_question_type")]
    pub question_type: String,
}

/// Direction a vocabulary question is asked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// Show the word, ask for its meaning.
    WordToMeaning,
    /// Show the meaning, ask for the word in its source language.
    MeaningToWord,
}

/// Where a quiz item came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum QuizSource {
    Vocabulary { id: ItemId, mode: PresentationMode },
    Knowledge { id: ItemId, question_type: String },
}

/// A rendered question/answer pair. Built fresh for each quiz, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub source: QuizSource,
    pub question: String,
    pub answer: String,
    /// Shown after the question, before an answer is required. Not graded.
    #[serde(default)]
    pub hint: Option<String>,
}

impl QuizItem {
    pub fn family(&self) -> ItemFamily {
        match self.source {
            QuizSource::Vocabulary { .. } => ItemFamily::Vocabulary,
            QuizSource::Knowledge { .. } => ItemFamily::Knowledge,
        }
    }

    pub fn source_id(&self) -> ItemId {
        match self.source {
            QuizSource::Vocabulary { id, .. } | QuizSource::Knowledge { id, .. } => id,
        }
    }
}

/// Per-kind item counts for the whole library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub english: usize,
    pub chinese: usize,
    pub notes: usize,
    pub questions: usize,
}

impl LibraryStats {
    pub fn vocabulary(&self) -> usize {
        self.english + self.chinese
    }

    /// Items that can appear in a quiz (notes are excluded).
    pub fn quizzable(&self) -> usize {
        self.vocabulary() + self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.quizzable() == 0 && self.notes == 0
    }

    pub(crate) fn count_language(&mut self, language: Language) {
        match language {
            Language::English => self.english += 1,
            Language::Chinese => self.chinese += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_display_and_parse() {
        assert_eq!(Language::English.to_string(), "en");
        assert_eq!(Language::Chinese.to_string(), "cn");
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("Chinese".parse::<Language>().unwrap(), Language::Chinese);
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Chinese);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn language_serde_uses_tags() {
        let json = serde_json::to_string(&Language::Chinese).unwrap();
        assert_eq!(json, "\"cn\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::English);
    }

    #[test]
    fn quiz_item_reports_family_and_id() {
        let item = QuizItem {
            source: QuizSource::Knowledge {
                id: 7,
                question_type: "open".into(),
            },
            question: "Q".into(),
            answer: "A".into(),
            hint: None,
        };
        assert_eq!(item.family(), ItemFamily::Knowledge);
        assert_eq!(item.source_id(), 7);
    }

    #[test]
    fn question_type_defaults_to_open() {
        let q: NewKnowledgeQuestion =
            serde_json::from_str(r#"{"question":"Q","answer":"A"}"#).unwrap();
        assert_eq!(q.question_type, DEFAULT_QUESTION_TYPE);
        assert!(q.note_id.is_none());
    }

    #[test]
    fn library_stats_totals() {
        let stats = LibraryStats {
            english: 5,
            chinese: 5,
            notes: 1,
            questions: 3,
        };
        assert_eq!(stats.vocabulary(), 10);
        assert_eq!(stats.quizzable(), 13);
        assert!(!stats.is_empty());
        assert!(LibraryStats::default().is_empty());
    }
}
