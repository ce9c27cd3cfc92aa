//! Indexing and search for Bible translations.
//!
//! A translation is a JSON document of the shape
//! `{ book: { chapter: { verse: text } } }`. [`Bible::from_json`] parses it
//! into verses in canonical reading order, builds an inverted token index in
//! the same pass, and answers reference lookups (`John 3:16`), book-scoped
//! keyword searches (`Genesis beginning`) and ranked full-text searches.
//! [`TranslationRegistry`] loads named translations lazily.

pub mod bible;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod registry;
pub mod search;
pub mod tracing;
pub mod types;

pub use bible::Bible;
pub use config::Config;
pub use corpus::{CANONICAL_BOOKS, Corpus, CorpusBuilder};
pub use error::{LoadError, ParseError};
pub use registry::{TranslationRegistry, TranslationSource};
pub use search::{InvertedIndex, MatchTier, Score, SearchHit, SearchOutcome, Strategy};
pub use types::Verse;
