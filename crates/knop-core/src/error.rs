//! Error types.
//!
//! `RepositoryError` is what storage backends return; it is defined here so
//! callers can downcast and react to a missing item without string matching.

use thiserror::Error;

use crate::model::{ItemFamily, ItemId};

/// Errors raised by an item repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No stored item matches the given family and id.
    #[error("{family} item {id} not found")]
    ItemNotFound { family: ItemFamily, id: ItemId },

    /// The item being inserted is missing a required field.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors that abort a quiz session.
///
/// A session that fails this way has no trustworthy result; partial tallies
/// are discarded.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Sampling or recording an answer failed.
    #[error("repository failure: {0:#}")]
    Repository(anyhow::Error),

    /// The caller's input channel failed (e.g. stdin was closed).
    #[error("interaction failed: {0:#}")]
    Interaction(anyhow::Error),
}

/// Problems found while loading a deck file.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("vocabulary entry #{index}: {reason}")]
    UnknownLanguage { index: usize, reason: String },

    #[error("vocabulary entry #{index}: {field} must not be empty")]
    EmptyVocabularyField { index: usize, field: &'static str },

    #[error("note #{index}: topic must not be empty")]
    EmptyTopic { index: usize },

    #[error("note #{note} question #{index}: {field} must not be empty")]
    EmptyQuestionField {
        note: usize,
        index: usize,
        field: &'static str,
    },
}
