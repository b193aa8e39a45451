//! Quiz assembly: sample both item families, build items, shuffle, truncate.

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::builder::{build_knowledge_item, build_vocabulary_item};
use crate::model::QuizItem;
use crate::traits::ItemRepository;

/// How many items of each family to sample for a quiz of `count` items.
///
/// Vocabulary gets one extra slot: `(count / 2 + 1, count / 2)`.
pub fn sample_split(count: usize) -> (usize, usize) {
    (count / 2 + 1, count / 2)
}

/// Assemble a quiz of at most `count` items.
///
/// The split from [`sample_split`] applies while both families have enough
/// items; a short family hands its unused slots to the other one. Returns
/// fewer than `count` items only when the repository holds fewer in total;
/// an empty repository yields an empty quiz. Read-only.
pub fn assemble_quiz<R: Rng + ?Sized>(
    repo: &dyn ItemRepository,
    count: usize,
    rng: &mut R,
) -> Result<Vec<QuizItem>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let (vocab_limit, question_limit) = sample_split(count);

    let mut vocabulary = repo
        .sample_vocabulary(vocab_limit)
        .context("failed to sample vocabulary")?;

    let vocab_shortfall = vocab_limit.saturating_sub(vocabulary.len());
    let questions = repo
        .sample_questions(question_limit + vocab_shortfall)
        .context("failed to sample knowledge questions")?;

    let question_shortfall = question_limit.saturating_sub(questions.len());
    if question_shortfall > 0 && vocab_shortfall == 0 {
        vocabulary = repo
            .sample_vocabulary(vocab_limit + question_shortfall)
            .context("failed to sample vocabulary")?;
    }

    tracing::debug!(
        vocabulary = vocabulary.len(),
        questions = questions.len(),
        requested = count,
        "sampled quiz candidates"
    );

    let mut quiz: Vec<QuizItem> = vocabulary
        .iter()
        .map(|entry| build_vocabulary_item(entry, &mut *rng))
        .chain(questions.iter().map(build_knowledge_item))
        .collect();

    quiz.shuffle(rng);
    quiz.truncate(count);
    Ok(quiz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRepository;
    use crate::model::{ItemFamily, ItemId, Language, NewKnowledgeQuestion, NewVocabularyEntry};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn repo_with(vocab: usize, questions: usize) -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        for i in 0..vocab {
            repo.insert_vocabulary(&NewVocabularyEntry {
                language: Language::English,
                word: format!("word{i}"),
                phonetic: None,
                meaning: format!("meaning{i}"),
                example: None,
            })
            .unwrap();
        }
        for i in 0..questions {
            repo.insert_question(&NewKnowledgeQuestion {
                note_id: None,
                question: format!("question{i}"),
                answer: format!("answer{i}"),
                question_type: "open".into(),
            })
            .unwrap();
        }
        repo
    }

    #[test]
    fn split_biases_toward_vocabulary() {
        assert_eq!(sample_split(1), (1, 0));
        assert_eq!(sample_split(3), (2, 1));
        assert_eq!(sample_split(5), (3, 2));
        assert_eq!(sample_split(10), (6, 5));
    }

    #[test]
    fn never_returns_more_than_requested() {
        let repo = repo_with(10, 3);
        let mut rng = StdRng::seed_from_u64(1);
        for n in 1..=20 {
            let quiz = assemble_quiz(&repo, n, &mut rng).unwrap();
            assert!(quiz.len() <= n);
        }
    }

    #[test]
    fn returns_exactly_n_when_enough_items() {
        let repo = repo_with(10, 3);
        let mut rng = StdRng::seed_from_u64(2);
        let quiz = assemble_quiz(&repo, 3, &mut rng).unwrap();
        assert_eq!(quiz.len(), 3);
    }

    #[test]
    fn returns_everything_sampled_when_short() {
        let repo = repo_with(2, 1);
        let mut rng = StdRng::seed_from_u64(3);
        let quiz = assemble_quiz(&repo, 10, &mut rng).unwrap();
        assert_eq!(quiz.len(), 3);
    }

    #[test]
    fn short_family_is_backfilled() {
        let mut rng = StdRng::seed_from_u64(9);

        let only_questions = repo_with(0, 5);
        let quiz = assemble_quiz(&only_questions, 3, &mut rng).unwrap();
        assert_eq!(quiz.len(), 3);
        assert!(quiz.iter().all(|i| i.family() == ItemFamily::Knowledge));

        let only_vocab = repo_with(6, 0);
        let quiz = assemble_quiz(&only_vocab, 5, &mut rng).unwrap();
        assert_eq!(quiz.len(), 5);
        assert!(quiz.iter().all(|i| i.family() == ItemFamily::Vocabulary));
    }

    #[test]
    fn empty_repository_yields_empty_quiz() {
        let repo = InMemoryRepository::new();
        let mut rng = StdRng::seed_from_u64(4);
        assert!(assemble_quiz(&repo, 5, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn items_are_unique_and_mixed() {
        let repo = repo_with(10, 10);
        let mut rng = StdRng::seed_from_u64(5);
        let quiz = assemble_quiz(&repo, 10, &mut rng).unwrap();
        let keys: HashSet<(ItemFamily, ItemId)> =
            quiz.iter().map(|i| (i.family(), i.source_id())).collect();
        assert_eq!(keys.len(), quiz.len());
        assert!(quiz.iter().any(|i| i.family() == ItemFamily::Vocabulary));
        assert!(quiz.iter().any(|i| i.family() == ItemFamily::Knowledge));
    }

    #[test]
    fn order_varies_across_calls() {
        let repo = repo_with(20, 20);
        let mut rng = StdRng::seed_from_u64(6);
        let orders: HashSet<Vec<(ItemFamily, ItemId)>> = (0..10)
            .map(|_| {
                assemble_quiz(&repo, 8, &mut rng)
                    .unwrap()
                    .iter()
                    .map(|i| (i.family(), i.source_id()))
                    .collect()
            })
            .collect();
        assert!(orders.len() > 1, "quiz order never changed");
    }

    #[test]
    fn does_not_touch_counters() {
        let repo = repo_with(3, 3);
        let mut rng = StdRng::seed_from_u64(8);
        let quiz = assemble_quiz(&repo, 5, &mut rng).unwrap();
        for item in &quiz {
            match item.family() {
                ItemFamily::Vocabulary => {
                    let entry = repo.vocabulary_entry(item.source_id()).unwrap().unwrap();
                    assert_eq!(entry.times_shown, 0);
                }
                ItemFamily::Knowledge => {
                    let q = repo.question(item.source_id()).unwrap().unwrap();
                    assert_eq!(q.times_shown, 0);
                }
            }
        }
    }
}
