//! knop-core: Quiz assembly, session running, and scoring.
//!
//! This crate defines the data model, the repository and prompter traits, and
//! the quiz logic that the store and CLI crates build on.

pub mod assembler;
pub mod builder;
pub mod deck;
pub mod error;
pub mod memory;
pub mod model;
pub mod report;
pub mod scoring;
pub mod session;
pub mod traits;
