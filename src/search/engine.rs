//! Query resolution.
//!
//! A query is tried against four strategies in order of cost:
//!
//! 1. reference lookup (`John 3:16`, `Genesis 1`, `Jude`)
//! 2. keyword search scoped to a book (`Genesis beginning`)
//! 3. keyword search over index candidates (`let there be light`)
//! 4. keyword search over every verse
//!
//! The first two pass the query on when they find nothing. The indexed search
//! answers whenever the index narrows the corpus to at least one candidate,
//! even if no candidate then matches; the full scan only runs when the index
//! could not produce a candidate set.

use super::index::{Candidates, InvertedIndex};
use super::query::{ReferenceQuery, find_book};
use super::scoring::{Score, fuzzy_match};
use super::tokenize::tokenize;
use crate::corpus::Corpus;
use crate::types::Verse;
use std::fmt;

/// The strategy that answered a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The query was empty; nothing was searched.
    Empty,
    Reference,
    BookScoped,
    Indexed,
    FullScan,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Reference => "reference",
            Self::BookScoped => "book-scoped",
            Self::Indexed => "indexed",
            Self::FullScan => "full-scan",
        })
    }
}

/// A verse returned by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub verse: &'a Verse,
    /// Relevance; `None` for reference lookups, which are not ranked.
    pub score: Option<Score>,
}

/// Result of resolving a query: the hits, best first, and the strategy that
/// answered. An empty outcome names the strategy that gave up: the indexed
/// search when it had candidates but none matched, otherwise the full scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<'a> {
    pub strategy: Strategy,
    pub hits: Vec<SearchHit<'a>>,
}

impl<'a> SearchOutcome<'a> {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// The matched verses, best first.
    pub fn verses(&self) -> Vec<&'a Verse> {
        self.hits.iter().map(|hit| hit.verse).collect()
    }
}

/// Read-only view over a corpus and its index that answers queries.
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<'a> {
    corpus: &'a Corpus,
    index: &'a InvertedIndex,
}

impl<'a> SearchEngine<'a> {
    pub const fn new(corpus: &'a Corpus, index: &'a InvertedIndex) -> Self {
        Self { corpus, index }
    }

    /// Resolve `query`, trying each strategy until one answers.
    ///
    /// Never fails: a query nothing matches yields an empty outcome.
    pub fn search(&self, query: &str) -> SearchOutcome<'a> {
        if query.trim().is_empty() {
            return SearchOutcome {
                strategy: Strategy::Empty,
                hits: Vec::new(),
            };
        }

        let strategies: [(Strategy, fn(&Self, &str) -> Option<Vec<SearchHit<'a>>>); 3] = [
            (Strategy::Reference, Self::by_reference),
            (Strategy::BookScoped, Self::in_book),
            (Strategy::Indexed, Self::indexed),
        ];

        for (strategy, run) in strategies {
            if let Some(hits) = run(self, query) {
                return answer(query, strategy, hits);
            }
        }

        answer(query, Strategy::FullScan, self.full_scan(query))
    }

    /// Resolve a book name the way queries do (case-insensitive prefix,
    /// earliest book wins).
    pub fn find_book(&self, name: &str) -> Option<&'a str> {
        find_book(self.corpus.list_books(), name)
    }

    /// `<book> [<chapter>[:<verse>]]`: every verse of the book passing the
    /// chapter and verse filters, in reading order.
    fn by_reference(&self, query: &str) -> Option<Vec<SearchHit<'a>>> {
        let reference = ReferenceQuery::parse(query)?;
        let book = self.find_book(&reference.book)?;

        let hits: Vec<_> = self
            .corpus
            .book_verses(book)
            .iter()
            .filter(|verse| reference.chapter.is_none_or(|c| verse.chapter == c))
            .filter(|verse| reference.verse.is_none_or(|v| verse.verse == v))
            .map(|verse| SearchHit { verse, score: None })
            .collect();
        non_empty(hits)
    }

    /// `<book words...> <term>`: the last word scored against one book.
    fn in_book(&self, query: &str) -> Option<Vec<SearchHit<'a>>> {
        let words: Vec<&str> = query.split_whitespace().collect();
        let (term, book_words) = words.split_last()?;
        if book_words.is_empty() {
            return None;
        }
        let book = self.find_book(&book_words.join(" "))?;

        non_empty(rank(self.corpus.book_verses(book).iter(), term))
    }

    /// Verses containing every indexable query token, scored against the
    /// whole query.
    ///
    /// `None` when the index cannot narrow the corpus: no indexable token, a
    /// token that occurs nowhere, or no verse holding every token. Once there
    /// are candidates the result is final, even if none of them match.
    fn indexed(&self, query: &str) -> Option<Vec<SearchHit<'a>>> {
        match self.index.candidates(&tokenize(query)) {
            Candidates::Matches(positions) if !positions.is_empty() => {
                let verses = self.corpus.verses();
                Some(rank(positions.iter().filter_map(|&p| verses.get(p)), query))
            }
            Candidates::Matches(_) => {
                tracing::trace!("No verse contains every token of {:?}", query);
                None
            }
            Candidates::Absent(token) => {
                tracing::trace!("Token {:?} is not in the index", token);
                None
            }
            Candidates::Unfiltered => None,
        }
    }

    /// Every verse scored against the query.
    fn full_scan(&self, query: &str) -> Vec<SearchHit<'a>> {
        rank(self.corpus.verses().iter(), query)
    }
}

fn answer<'a>(query: &str, strategy: Strategy, hits: Vec<SearchHit<'a>>) -> SearchOutcome<'a> {
    if hits.is_empty() {
        tracing::debug!("Query {:?} matched nothing ({})", query, strategy);
    } else {
        tracing::debug!("Query {:?} answered by {} ({} hits)", query, strategy, hits.len());
    }
    SearchOutcome { strategy, hits }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

/// Score `verses` against `pattern`, keep matches and sort best first.
///
/// The sort is stable, so equally scored verses stay in reading order.
fn rank<'a>(verses: impl Iterator<Item = &'a Verse>, pattern: &str) -> Vec<SearchHit<'a>> {
    let mut hits: Vec<SearchHit<'a>> = verses
        .filter_map(|verse| {
            fuzzy_match(&verse.text, pattern).map(|score| SearchHit {
                verse,
                score: Some(score),
            })
        })
        .collect();

    hits.sort_by_key(|hit| hit.score);
    hits
}
