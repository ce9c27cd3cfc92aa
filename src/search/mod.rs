//! Full-text search over a corpus.
//!
//! This module provides tokenization, the inverted token index, relevance
//! scoring, reference parsing and the multi-strategy query resolution built
//! on top of them.

// Module declarations
pub mod engine;
pub mod index;
pub mod query;
pub mod scoring;
pub mod tokenize;

// Public re-exports (used via lib.rs)
pub use engine::{SearchEngine, SearchHit, SearchOutcome, Strategy};
pub use index::{Candidates, InvertedIndex, Position, intersect};
pub use query::{BookSuggestion, ReferenceQuery, find_book, suggest_books};
pub use scoring::{MatchTier, Score, fuzzy_match};
pub use tokenize::{MIN_TOKEN_LENGTH, clean_word, tokenize};
