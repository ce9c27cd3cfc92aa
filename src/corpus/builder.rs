//! One-pass construction of a corpus and its token index.

use super::canon::canonical_order;
use super::document::{RawBook, SourceDocument, numbered};
use super::{BookSpan, Corpus};
use crate::search::InvertedIndex;
use crate::types::Verse;

/// Accumulates verses in reading order, indexing each one as it is added.
///
/// Books and chapters must be pushed in the order they should be read; the
/// builder records the spans as it goes. Nothing is observable until
/// [`finalize`](Self::finalize), so a half-built corpus never escapes.
#[derive(Debug, Default)]
pub struct CorpusBuilder {
    corpus: Corpus,
    index: InvertedIndex,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a decoded document: books in canonical order, chapters and
    /// verses in numeric order. Non-numeric keys are skipped.
    pub fn from_document(document: &SourceDocument) -> Self {
        let mut builder = Self::new();

        for name in canonical_order(document.book_names()) {
            if let Some(book) = document.book(name) {
                builder.push_book(name, book);
            }
        }

        builder
    }

    fn push_book(&mut self, name: &str, book: &RawBook) {
        self.start_book(name);
        for (chapter_number, chapter) in numbered(book) {
            for (verse_number, text) in numbered(chapter) {
                self.push_verse(name, chapter_number, verse_number, text);
            }
        }
    }

    /// Register a book, even if it ends up without any verses.
    pub fn start_book(&mut self, book: &str) {
        if !self.corpus.spans.contains_key(book) {
            let start = self.corpus.verses.len();
            self.corpus.books.push(book.to_string());
            self.corpus.spans.insert(
                book.to_string(),
                BookSpan {
                    verses: start..start,
                    chapters: Default::default(),
                },
            );
        }
    }

    /// Append the next verse in reading order and index its text.
    ///
    /// Verses of one book must be pushed together, chapter by chapter. A verse
    /// for a book or chapter that has already been left is rejected and
    /// `false` is returned.
    pub fn push_verse(&mut self, book: &str, chapter: u32, verse: u32, text: &str) -> bool {
        self.start_book(book);

        let position = self.corpus.verses.len();
        let Some(span) = self.corpus.spans.get_mut(book) else {
            return false;
        };

        let chapter_closed = span
            .chapters
            .get(&chapter)
            .is_some_and(|range| range.end != position);
        if span.verses.end != position || chapter_closed {
            tracing::warn!(
                "Rejected {} {}:{}: its book or chapter is no longer the one being built",
                book,
                chapter,
                verse
            );
            return false;
        }

        span.verses.end = position + 1;
        span.chapters
            .entry(chapter)
            .and_modify(|range| range.end = position + 1)
            .or_insert(position..position + 1);

        self.index.add(position, text);
        self.corpus
            .verses
            .push(Verse::new(book, chapter, verse, text));
        true
    }

    /// Finish construction.
    pub fn finalize(self) -> (Corpus, InvertedIndex) {
        tracing::debug!(
            "Built corpus: {} books, {} verses, {} unique terms",
            self.corpus.books.len(),
            self.corpus.verses.len(),
            self.index.term_count()
        );
        (self.corpus, self.index)
    }
}
