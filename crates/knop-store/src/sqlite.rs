//! SQLite-backed item repository.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use knop_core::error::RepositoryError;
use knop_core::model::{
    ItemFamily, ItemId, KnowledgeQuestion, Language, LibraryStats, NewKnowledgeNote,
    NewKnowledgeQuestion, NewVocabularyEntry, VocabularyEntry,
};
use knop_core::traits::ItemRepository;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vocabulary (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    language TEXT NOT NULL,
    word TEXT NOT NULL,
    phonetic TEXT,
    meaning TEXT NOT NULL,
    example TEXT,
    times_correct INTEGER NOT NULL DEFAULT 0,
    times_shown INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    CHECK (times_correct <= times_shown)
);

CREATE TABLE IF NOT EXISTS knowledge (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS quiz_questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    knowledge_id INTEGER REFERENCES knowledge(id) ON DELETE SET NULL,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    question_type TEXT NOT NULL DEFAULT 'open',
    times_correct INTEGER NOT NULL DEFAULT 0,
    times_shown INTEGER NOT NULL DEFAULT 0,
    CHECK (times_correct <= times_shown)
);
";

const VOCABULARY_COLUMNS: &str =
    "id, language, word, phonetic, meaning, example, times_shown, times_correct";

const QUESTION_COLUMNS: &str =
    "id, knowledge_id, question, answer, question_type, times_shown, times_correct";

/// Item repository stored in a SQLite database file.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    /// Open a throwaway database that lives only as long as the repository.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .context("failed to initialize database schema")?;
        Ok(Self { conn })
    }

    fn count(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .with_context(|| format!("failed to count {table}"))?;
        Ok(count as usize)
    }
}

fn vocabulary_from_row(row: &Row) -> Result<VocabularyEntry, rusqlite::Error> {
    let language: String = row.get(1)?;
    let language = language.parse::<Language>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            Type::Text,
            Box::new(RepositoryError::InvalidItem(e)),
        )
    })?;
    Ok(VocabularyEntry {
        id: row.get(0)?,
        language,
        word: row.get(2)?,
        phonetic: row.get(3)?,
        meaning: row.get(4)?,
        example: row.get(5)?,
        times_shown: row.get(6)?,
        times_correct: row.get(7)?,
    })
}

fn question_from_row(row: &Row) -> Result<KnowledgeQuestion, rusqlite::Error> {
    Ok(KnowledgeQuestion {
        id: row.get(0)?,
        note_id: row.get(1)?,
        question: row.get(2)?,
        answer: row.get(3)?,
        question_type: row.get(4)?,
        times_shown: row.get(5)?,
        times_correct: row.get(6)?,
    })
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn require(value: &str, what: &str) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        Err(RepositoryError::InvalidItem(format!("{what} is required")))
    } else {
        Ok(())
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl ItemRepository for SqliteRepository {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn count_all(&self) -> Result<LibraryStats> {
        let mut stats = LibraryStats {
            notes: self.count("knowledge")?,
            questions: self.count("quiz_questions")?,
            ..LibraryStats::default()
        };

        let mut stmt = self
            .conn
            .prepare("SELECT language, COUNT(*) FROM vocabulary GROUP BY language")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (language, count) = row.context("failed to count vocabulary")?;
            match language.parse::<Language>() {
                Ok(Language::English) => stats.english += count as usize,
                Ok(Language::Chinese) => stats.chinese += count as usize,
                Err(e) => tracing::warn!("skipping {count} vocabulary rows: {e}"),
            }
        }

        Ok(stats)
    }

    fn sample_vocabulary(&self, limit: usize) -> Result<Vec<VocabularyEntry>> {
        let sql =
            format!("SELECT {VOCABULARY_COLUMNS} FROM vocabulary ORDER BY RANDOM() LIMIT ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let entries = stmt
            .query_map(params![sql_limit(limit)], vocabulary_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to sample vocabulary")?;
        Ok(entries)
    }

    fn sample_questions(&self, limit: usize) -> Result<Vec<KnowledgeQuestion>> {
        let sql =
            format!("SELECT {QUESTION_COLUMNS} FROM quiz_questions ORDER BY RANDOM() LIMIT ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let questions = stmt
            .query_map(params![sql_limit(limit)], question_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to sample knowledge questions")?;
        Ok(questions)
    }

    fn record_answer(&self, family: ItemFamily, id: ItemId, was_correct: bool) -> Result<()> {
        let table = match family {
            ItemFamily::Vocabulary => "vocabulary",
            ItemFamily::Knowledge => "quiz_questions",
        };
        let sql = format!(
            "UPDATE {table}
             SET times_shown = times_shown + 1,
                 times_correct = times_correct + ?1
             WHERE id = ?2"
        );
        let updated = self
            .conn
            .execute(&sql, params![i64::from(was_correct), id])
            .with_context(|| format!("failed to record answer for {family} item {id}"))?;
        if updated == 0 {
            return Err(RepositoryError::ItemNotFound { family, id }.into());
        }
        Ok(())
    }

    fn insert_vocabulary(&self, entry: &NewVocabularyEntry) -> Result<ItemId> {
        require(&entry.word, "word")?;
        require(&entry.meaning, "meaning")?;
        self.conn
            .execute(
                "INSERT INTO vocabulary (language, word, phonetic, meaning, example, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entry.language.tag(),
                    entry.word,
                    entry.phonetic,
                    entry.meaning,
                    entry.example,
                    now()
                ],
            )
            .with_context(|| format!("failed to insert word '{}'", entry.word))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_note(&self, note: &NewKnowledgeNote) -> Result<ItemId> {
        require(&note.topic, "topic")?;
        self.conn
            .execute(
                "INSERT INTO knowledge (topic, content, created_at) VALUES (?1, ?2, ?3)",
                params![note.topic, note.content, now()],
            )
            .with_context(|| format!("failed to insert note '{}'", note.topic))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_question(&self, question: &NewKnowledgeQuestion) -> Result<ItemId> {
        require(&question.question, "question")?;
        require(&question.answer, "answer")?;
        self.conn
            .execute(
                "INSERT INTO quiz_questions (knowledge_id, question, answer, question_type)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    question.note_id,
                    question.question,
                    question.answer,
                    question.question_type
                ],
            )
            .with_context(|| format!("failed to insert question '{}'", question.question))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn clear(&self) -> Result<()> {
        // Dropping an uncommitted transaction rolls it back.
        let tx = self
            .conn
            .unchecked_transaction()
            .context("failed to begin clear")?;
        for table in ["quiz_questions", "knowledge", "vocabulary"] {
            tx.execute(&format!("DELETE FROM {table}"), [])
                .with_context(|| format!("failed to clear {table}"))?;
        }
        tx.commit().context("failed to commit clear")?;
        Ok(())
    }

    fn vocabulary_entry(&self, id: ItemId) -> Result<Option<VocabularyEntry>> {
        let sql = format!("SELECT {VOCABULARY_COLUMNS} FROM vocabulary WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], vocabulary_from_row)
            .optional()
            .with_context(|| format!("failed to load vocabulary item {id}"))
    }

    fn question(&self, id: ItemId) -> Result<Option<KnowledgeQuestion>> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM quiz_questions WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], question_from_row)
            .optional()
            .with_context(|| format!("failed to load knowledge question {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn english(word: &str, meaning: &str) -> NewVocabularyEntry {
        NewVocabularyEntry {
            language: Language::English,
            word: word.into(),
            phonetic: None,
            meaning: meaning.into(),
            example: None,
        }
    }

    fn question(text: &str) -> NewKnowledgeQuestion {
        NewKnowledgeQuestion {
            note_id: None,
            question: text.into(),
            answer: "yes".into(),
            question_type: "open".into(),
        }
    }

    #[test]
    fn insert_and_load_vocabulary() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let id = repo
            .insert_vocabulary(&NewVocabularyEntry {
                language: Language::Chinese,
                word: "你好".into(),
                phonetic: Some("nǐ hǎo".into()),
                meaning: "xin chào".into(),
                example: Some("你好，你好吗？".into()),
            })
            .unwrap();

        let entry = repo.vocabulary_entry(id).unwrap().unwrap();
        assert_eq!(entry.language, Language::Chinese);
        assert_eq!(entry.word, "你好");
        assert_eq!(entry.phonetic.as_deref(), Some("nǐ hǎo"));
        assert_eq!((entry.times_shown, entry.times_correct), (0, 0));
        assert!(repo.vocabulary_entry(id + 100).unwrap().is_none());
    }

    #[test]
    fn record_answer_correct_and_incorrect() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let vocab_id = repo.insert_vocabulary(&english("book", "quyển sách")).unwrap();
        let question_id = repo.insert_question(&question("Is Rust fun?")).unwrap();

        repo.record_answer(ItemFamily::Vocabulary, vocab_id, true)
            .unwrap();
        let entry = repo.vocabulary_entry(vocab_id).unwrap().unwrap();
        assert_eq!((entry.times_shown, entry.times_correct), (1, 1));

        repo.record_answer(ItemFamily::Vocabulary, vocab_id, false)
            .unwrap();
        let entry = repo.vocabulary_entry(vocab_id).unwrap().unwrap();
        assert_eq!((entry.times_shown, entry.times_correct), (2, 1));

        repo.record_answer(ItemFamily::Knowledge, question_id, false)
            .unwrap();
        let q = repo.question(question_id).unwrap().unwrap();
        assert_eq!((q.times_shown, q.times_correct), (1, 0));
        assert!(q.times_correct <= q.times_shown);
    }

    #[test]
    fn record_answer_unknown_id() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let err = repo
            .record_answer(ItemFamily::Vocabulary, 404, true)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::ItemNotFound {
                family: ItemFamily::Vocabulary,
                id: 404
            })
        ));
    }

    #[test]
    fn sampling_respects_limit_without_duplicates() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        for i in 0..8 {
            repo.insert_vocabulary(&english(&format!("w{i}"), &format!("m{i}")))
                .unwrap();
        }
        let sample = repo.sample_vocabulary(5).unwrap();
        assert_eq!(sample.len(), 5);
        let ids: HashSet<_> = sample.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 5);

        assert_eq!(repo.sample_vocabulary(100).unwrap().len(), 8);
        assert!(repo.sample_questions(3).unwrap().is_empty());
    }

    #[test]
    fn failed_clear_rolls_back_and_leaves_connection_usable() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.insert_vocabulary(&english("apple", "quả táo")).unwrap();
        repo.insert_question(&question("Is Rust fun?")).unwrap();
        repo.conn
            .execute_batch(
                "CREATE TRIGGER block_vocabulary_delete BEFORE DELETE ON vocabulary
                 BEGIN SELECT RAISE(ABORT, 'vocabulary is locked'); END;",
            )
            .unwrap();

        let err = repo.clear().unwrap_err();
        assert!(format!("{err:#}").contains("failed to clear vocabulary"));
        assert!(repo.conn.is_autocommit());

        let stats = repo.count_all().unwrap();
        assert_eq!((stats.english, stats.questions), (1, 1));

        repo.insert_vocabulary(&english("book", "quyển sách")).unwrap();
        assert!(repo.conn.is_autocommit());
        assert_eq!(repo.count_all().unwrap().english, 2);
    }

    #[test]
    fn count_all_and_clear() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.insert_vocabulary(&english("apple", "quả táo")).unwrap();
        repo.insert_vocabulary(&NewVocabularyEntry {
            language: Language::Chinese,
            word: "书".into(),
            phonetic: Some("shū".into()),
            meaning: "quyển sách".into(),
            example: None,
        })
        .unwrap();
        let note_id = repo
            .insert_note(&NewKnowledgeNote {
                topic: "Closures".into(),
                content: "...".into(),
            })
            .unwrap();
        repo.insert_question(&NewKnowledgeQuestion {
            note_id: Some(note_id),
            ..question("What is a closure?")
        })
        .unwrap();

        let stats = repo.count_all().unwrap();
        assert_eq!(
            stats,
            LibraryStats {
                english: 1,
                chinese: 1,
                notes: 1,
                questions: 1
            }
        );

        repo.clear().unwrap();
        assert!(repo.count_all().unwrap().is_empty());
    }

    #[test]
    fn rejects_empty_meaning() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let err = repo.insert_vocabulary(&english("apple", "")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::InvalidItem(_))
        ));
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("knop.db");
        let id = {
            let repo = SqliteRepository::open(&path).unwrap();
            let id = repo.insert_vocabulary(&english("hello", "xin chào")).unwrap();
            repo.record_answer(ItemFamily::Vocabulary, id, true).unwrap();
            id
        };

        let repo = SqliteRepository::open(&path).unwrap();
        let entry = repo.vocabulary_entry(id).unwrap().unwrap();
        assert_eq!(entry.word, "hello");
        assert_eq!(entry.times_correct, 1);
    }
}
