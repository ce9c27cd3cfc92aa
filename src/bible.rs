//! One loaded translation: its corpus and token index.

use crate::corpus::{Corpus, CorpusBuilder, SourceDocument};
use crate::error::ParseError;
use crate::search::{BookSuggestion, InvertedIndex, SearchEngine, SearchOutcome, suggest_books};
use crate::types::Verse;
use std::time::Instant;

/// A translation ready for reading and searching.
///
/// Built once from a source document and immutable afterwards, so it can be
/// shared freely between threads (the registry hands out `Arc<Bible>`).
#[derive(Debug, Clone, Default)]
pub struct Bible {
    corpus: Corpus,
    index: InvertedIndex,
}

impl Bible {
    /// Parse a `{ book: { chapter: { verse: text } } }` JSON document and
    /// index it.
    ///
    /// Fails only when the document does not have that shape. Chapter and
    /// verse keys that are not numbers are skipped.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ParseError> {
        let start = Instant::now();
        let document = SourceDocument::from_json(bytes)?;
        let bible = Self::from_document(&document);

        tracing::info!(
            "Indexed {} verses in {} books ({} unique terms) in {:?}",
            bible.corpus.verse_count(),
            bible.corpus.list_books().len(),
            bible.index.term_count(),
            start.elapsed()
        );

        Ok(bible)
    }

    /// Build from an already decoded document.
    pub fn from_document(document: &SourceDocument) -> Self {
        let (corpus, index) = CorpusBuilder::from_document(document).finalize();
        Self { corpus, index }
    }

    /// Assemble from parts produced by a [`CorpusBuilder`].
    pub fn from_builder(builder: CorpusBuilder) -> Self {
        let (corpus, index) = builder.finalize();
        Self { corpus, index }
    }

    /// Book names in reading order.
    pub fn list_books(&self) -> &[String] {
        self.corpus.list_books()
    }

    /// Verses of one chapter in verse order; empty if the book (exact name)
    /// or chapter does not exist.
    pub fn verses_in_chapter(&self, book: &str, chapter: u32) -> &[Verse] {
        self.corpus.verses_in(book, chapter)
    }

    /// Chapter numbers of a book, ascending.
    pub fn chapters_in(&self, book: &str) -> Vec<u32> {
        self.corpus.chapters_in(book)
    }

    /// Ranked search. Empty for an empty query or when nothing matches.
    pub fn search(&self, query: &str) -> Vec<&Verse> {
        self.search_detailed(query).verses()
    }

    /// Ranked search, reporting scores and the strategy that answered.
    pub fn search_detailed(&self, query: &str) -> SearchOutcome<'_> {
        self.engine().search(query)
    }

    /// Resolve a loosely typed book name (`"gen"`, `"1 cor"`) to a book.
    pub fn find_book(&self, name: &str) -> Option<&str> {
        self.engine().find_book(name)
    }

    /// Books that look like `name`, best first.
    pub fn suggest_books(&self, name: &str, limit: usize) -> Vec<BookSuggestion<'_>> {
        suggest_books(self.corpus.list_books(), name, limit)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn engine(&self) -> SearchEngine<'_> {
        SearchEngine::new(&self.corpus, &self.index)
    }
}
