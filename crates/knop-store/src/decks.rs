//! Seed decks: the built-in sample deck and configured deck files.

use anyhow::{Context, Result};

use knop_core::deck::{parse_deck, parse_deck_str, seed_deck, Deck, SeedSummary};
use knop_core::traits::ItemRepository;

use crate::config::KnopConfig;

/// The deck shipped with knop.
pub const SAMPLE_DECK: &str = include_str!("../data/sample-deck.toml");

pub fn sample_deck() -> Result<Deck> {
    parse_deck_str(SAMPLE_DECK).context("built-in sample deck is invalid")
}

/// The configured deck, falling back to the sample deck.
pub fn configured_deck(config: &KnopConfig) -> Result<Deck> {
    match &config.deck_path {
        Some(path) => parse_deck(path),
        None => sample_deck(),
    }
}

/// Seed the configured deck if the library is empty and auto-seeding is on.
///
/// Returns what was inserted, or `None` when nothing was done.
pub fn seed_if_empty(
    repo: &dyn ItemRepository,
    config: &KnopConfig,
) -> Result<Option<SeedSummary>> {
    if !config.auto_seed {
        return Ok(None);
    }
    let stats = repo.count_all()?;
    if !stats.is_empty() {
        return Ok(None);
    }
    tracing::info!("library is empty, seeding deck");
    let deck = configured_deck(config)?;
    Ok(Some(seed_deck(repo, &deck)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::SqliteRepository;

    #[test]
    fn sample_deck_matches_expected_contents() {
        let deck = sample_deck().unwrap();
        assert_eq!(deck.vocabulary.len(), 10);
        assert_eq!(deck.notes.len(), 1);
        assert_eq!(deck.question_count(), 3);
        assert!(deck
            .vocabulary
            .iter()
            .any(|v| v.word == "你好" && v.phonetic.as_deref() == Some("nǐ hǎo")));
    }

    #[test]
    fn seeds_only_empty_library() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let config = KnopConfig::default();

        let summary = seed_if_empty(&repo, &config).unwrap().unwrap();
        assert_eq!(summary.english, 5);
        assert_eq!(summary.chinese, 5);
        assert_eq!(summary.questions, 3);

        assert!(seed_if_empty(&repo, &config).unwrap().is_none());
        assert_eq!(repo.count_all().unwrap().quizzable(), 13);
    }

    #[test]
    fn auto_seed_off_does_nothing() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let config = KnopConfig {
            auto_seed: false,
            ..KnopConfig::default()
        };
        assert!(seed_if_empty(&repo, &config).unwrap().is_none());
        assert!(repo.count_all().unwrap().is_empty());
    }

    #[test]
    fn configured_deck_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.toml");
        std::fs::write(
            &path,
            r#"
[[vocabulary]]
language = "en"
word = "river"
meaning = "dòng sông"
"#,
        )
        .unwrap();
        let config = KnopConfig {
            deck_path: Some(path),
            ..KnopConfig::default()
        };
        let deck = configured_deck(&config).unwrap();
        assert_eq!(deck.vocabulary.len(), 1);
        assert_eq!(deck.vocabulary[0].word, "river");
    }
}
