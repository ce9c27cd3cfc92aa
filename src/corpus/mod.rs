//! Verse storage and book/chapter lookup for one translation.

pub mod builder;
pub mod canon;
pub mod document;

pub use builder::CorpusBuilder;
pub use canon::{CANONICAL_BOOKS, canonical_order};
pub use document::{OrderedEntries, SourceDocument};

use crate::types::Verse;
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::ops::Range;

/// Where a book's verses live in the flat verse sequence.
#[derive(Debug, Clone, Default)]
struct BookSpan {
    verses: Range<usize>,
    chapters: BTreeMap<u32, Range<usize>>,
}

/// All verses of a translation in canonical reading order.
///
/// Each book occupies one contiguous run of the verse sequence, and each
/// chapter one contiguous run inside it, so lookups hand out slices rather
/// than copies.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    verses: Vec<Verse>,
    books: Vec<String>,
    spans: AHashMap<String, BookSpan>,
}

impl Corpus {
    /// Book names in canonical order, followed by non-canonical books in the
    /// order the source document listed them.
    pub fn list_books(&self) -> &[String] {
        &self.books
    }

    /// Verses of one chapter, ascending by verse number.
    ///
    /// `book` must match exactly; an unknown book or chapter yields an empty
    /// slice.
    pub fn verses_in(&self, book: &str, chapter: u32) -> &[Verse] {
        self.spans
            .get(book)
            .and_then(|span| span.chapters.get(&chapter))
            .map(|range| &self.verses[range.clone()])
            .unwrap_or_default()
    }

    /// Chapter numbers of a book, ascending.
    pub fn chapters_in(&self, book: &str) -> Vec<u32> {
        self.spans
            .get(book)
            .map(|span| span.chapters.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Every verse of a book in reading order.
    pub fn book_verses(&self, book: &str) -> &[Verse] {
        self.spans
            .get(book)
            .map(|span| &self.verses[span.verses.clone()])
            .unwrap_or_default()
    }

    /// The full verse sequence. Index positions refer into this slice.
    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty() && self.books.is_empty()
    }
}
