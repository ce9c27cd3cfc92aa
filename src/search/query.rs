//! Query parsing: references like `John 3:16` and book-name resolution.

use rapidfuzz::distance::jaro_winkler;

/// A parsed `<book> [<chapter>[:<verse>]]` reference.
///
/// Parsing never fails outright: a verse part that is not a positive number is
/// ignored, and a missing chapter just means "the whole book".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceQuery {
    pub book: String,
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
}

impl ReferenceQuery {
    /// Parse a reference.
    ///
    /// - `John 3:16` → book `John`, chapter 3, verse 16
    /// - `1 John 4` → book `1 John`, chapter 4
    /// - `Song Of Solomon` → book only
    /// - `John 3:abc` → book `John`, chapter 3, no verse filter
    ///
    /// Returns `None` when no book name is left, e.g. for `"3"` or `""`.
    pub fn parse(query: &str) -> Option<Self> {
        let query = query.trim();

        let parts: Vec<&str> = query.split(':').collect();
        let (book_chapter, verse) = match parts.as_slice() {
            [book_chapter, verse] => (book_chapter.trim(), parse_positive(verse.trim())),
            _ => (query, None),
        };

        let words: Vec<&str> = book_chapter.split_whitespace().collect();
        let (last, rest) = words.split_last()?;

        let (book, chapter) = match parse_positive(last) {
            Some(chapter) => (rest.join(" "), Some(chapter)),
            None => (words.join(" "), None),
        };

        if book.is_empty() {
            return None;
        }

        Some(Self {
            book,
            chapter,
            verse,
        })
    }
}

fn parse_positive(s: &str) -> Option<u32> {
    s.parse::<u32>().ok().filter(|&n| n > 0)
}

/// Resolve a loosely typed book name against `books`.
///
/// Case-insensitive; a book matches if it equals `name` or starts with it. The
/// first match in `books` order wins, so an ambiguous prefix always resolves
/// to the earliest book (`"j"` → `Joshua` before `Judges`).
pub fn find_book<'a>(books: &'a [String], name: &str) -> Option<&'a str> {
    let name = name.to_lowercase();
    books
        .iter()
        .find(|book| book.to_lowercase().starts_with(&name))
        .map(String::as_str)
}

/// A book name suggested for a name that did not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct BookSuggestion<'a> {
    pub book: &'a str,
    /// Jaro-Winkler similarity, 0.0 to 1.0, higher is better.
    pub score: f64,
}

/// Rank `books` by similarity to `name`, best first.
pub fn suggest_books<'a>(books: &'a [String], name: &str, limit: usize) -> Vec<BookSuggestion<'a>> {
    let name = name.to_lowercase();
    let mut suggestions: Vec<_> = books
        .iter()
        .map(|book| BookSuggestion {
            book,
            score: jaro_winkler::similarity(name.chars(), book.to_lowercase().chars()),
        })
        .collect();

    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
    suggestions.truncate(limit);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CANONICAL_BOOKS;
    use assert2::{check, let_assert};
    use rstest::rstest;

    fn canon() -> Vec<String> {
        CANONICAL_BOOKS.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    #[case("John 3:16", "John", Some(3), Some(16))]
    #[case("  John 3 : 16  ", "John", Some(3), Some(16))]
    #[case("1 John 4", "1 John", Some(4), None)]
    #[case("1 John", "1 John", None, None)]
    #[case("Song Of Solomon 2:1", "Song Of Solomon", Some(2), Some(1))]
    #[case("Song   Of Solomon", "Song Of Solomon", None, None)]
    #[case("Genesis", "Genesis", None, None)]
    #[case("John 3:abc", "John", Some(3), None)]
    #[case("John 3:0", "John", Some(3), None)]
    #[case("John 0", "John 0", None, None)]
    #[case("John -3", "John -3", None, None)]
    #[case("John 3:16:2", "John 3:16:2", None, None)]
    #[case("Genesis beginning", "Genesis beginning", None, None)]
    fn test_parse_reference(
        #[case] input: &str,
        #[case] book: &str,
        #[case] chapter: Option<u32>,
        #[case] verse: Option<u32>,
    ) {
        let_assert!(Some(reference) = ReferenceQuery::parse(input));
        check!(reference.book == book);
        check!(reference.chapter == chapter);
        check!(reference.verse == verse);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("3")]
    #[case("3:16")]
    #[case(":16")]
    fn test_parse_reference_without_book(#[case] input: &str) {
        check!(ReferenceQuery::parse(input).is_none());
    }

    #[rstest]
    #[case("genesis", Some("Genesis"))]
    #[case("GEN", Some("Genesis"))]
    #[case("john", Some("John"))]
    #[case("1 john", Some("1 John"))]
    #[case("1", Some("1 Samuel"))]
    #[case("j", Some("Joshua"))]
    #[case("ju", Some("Judges"))]
    #[case("song", Some("Song Of Solomon"))]
    #[case("ps", Some("Psalm"))]
    #[case("psalms", None)]
    #[case("hezekiah", None)]
    #[case("ohn", None)]
    fn test_find_book(#[case] name: &str, #[case] expected: Option<&str>) {
        let books = canon();
        check!(find_book(&books, name) == expected);
    }

    #[test]
    fn test_find_book_follows_given_order() {
        let books: Vec<String> = vec!["1 John".into(), "John".into(), "Jonah".into()];
        check!(find_book(&books, "jo") == Some("John"));

        let books: Vec<String> = vec!["Jonah".into(), "John".into()];
        check!(find_book(&books, "jo") == Some("Jonah"));
    }

    #[test]
    fn test_find_book_in_empty_list() {
        check!(find_book(&[], "genesis").is_none());
    }

    #[test]
    fn test_suggest_books() {
        let books = canon();
        let suggestions = suggest_books(&books, "Revelations", 3);

        check!(suggestions.len() == 3);
        check!(suggestions[0].book == "Revelation");
        check!(suggestions.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_suggest_books_limit() {
        let books = canon();
        check!(suggest_books(&books, "x", 0).is_empty());
        check!(suggest_books(&books, "x", 100).len() == 66);
    }
}
