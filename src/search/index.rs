//! Inverted token index over a corpus.

use super::tokenize::{index_tokens, is_indexable};
use ahash::AHashMap;

/// Position of a verse in the corpus's flat verse sequence.
pub type Position = usize;

/// Map from normalized token to the positions of the verses containing it.
///
/// Posting lists are ascending and free of duplicates. Verses are added in
/// corpus order, which is what keeps them sorted; [`intersect`] depends on it.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: AHashMap<String, Vec<Position>>,
}

/// Candidate verses for a query, as narrowed by the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    /// No query token was long enough to be indexed; the index cannot narrow
    /// anything down.
    Unfiltered,
    /// A query token does not occur anywhere in the corpus.
    Absent(String),
    /// Positions of verses containing every indexable query token, ascending.
    Matches(Vec<Position>),
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the text of the verse at `position`.
    ///
    /// Positions must be added in ascending order.
    pub(crate) fn add(&mut self, position: Position, text: &str) {
        for token in index_tokens(text) {
            let list = self.postings.entry(token).or_default();
            debug_assert!(list.last().is_none_or(|&last| last <= position));
            if list.last() != Some(&position) {
                list.push(position);
            }
        }
    }

    /// Posting list of an already normalized token.
    pub fn postings(&self, token: &str) -> Option<&[Position]> {
        self.postings.get(token).map(Vec::as_slice)
    }

    /// Number of distinct tokens.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Narrow the corpus to verses containing all indexable `tokens`.
    ///
    /// `tokens` must already be lowercased and cleaned (see
    /// [`tokenize`](super::tokenize::tokenize)). Tokens too short to be indexed
    /// are ignored.
    pub fn candidates<S: AsRef<str>>(&self, tokens: &[S]) -> Candidates {
        let mut candidates: Option<Vec<Position>> = None;

        for token in tokens.iter().map(AsRef::as_ref) {
            if !is_indexable(token) {
                continue;
            }

            let Some(list) = self.postings(token) else {
                return Candidates::Absent(token.to_string());
            };

            candidates = Some(match candidates {
                None => list.to_vec(),
                Some(current) => intersect(&current, list),
            });
        }

        match candidates {
            Some(positions) => Candidates::Matches(positions),
            None => Candidates::Unfiltered,
        }
    }
}

/// Sorted intersection of two ascending position lists.
///
/// Single forward pass over both inputs, O(|a| + |b|).
pub fn intersect(a: &[Position], b: &[Position]) -> Vec<Position> {
    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    fn index_of(texts: &[&str]) -> InvertedIndex {
        let mut index = InvertedIndex::new();
        for (position, text) in texts.iter().enumerate() {
            index.add(position, text);
        }
        index
    }

    #[rstest]
    #[case(&[1, 3, 5, 7], &[3, 4, 5, 6], &[3, 5])]
    #[case(&[1, 2, 3], &[1, 2, 3], &[1, 2, 3])]
    #[case(&[1, 2, 3], &[4, 5, 6], &[])]
    #[case(&[], &[1, 2], &[])]
    #[case(&[0], &[0], &[0])]
    #[case(&[2, 4, 6, 8, 10, 12], &[12], &[12])]
    fn test_intersect(#[case] a: &[usize], #[case] b: &[usize], #[case] expected: &[usize]) {
        check!(intersect(a, b) == expected);
        check!(intersect(b, a) == expected);
    }

    #[test]
    fn test_postings_are_sorted_and_unique() {
        let index = index_of(&["Holy, holy, holy", "the Lord", "Holy is the LORD"]);

        check!(index.postings("holy") == Some(&[0, 2][..]));
        check!(index.postings("lord") == Some(&[1, 2][..]));
        check!(index.postings("the") == Some(&[1, 2][..]));
    }

    #[test]
    fn test_short_tokens_are_not_indexed() {
        let index = index_of(&["It is I; be not afraid"]);

        check!(index.postings("it").is_none());
        check!(index.postings("is").is_none());
        check!(index.postings("i").is_none());
        check!(index.postings("not") == Some(&[0][..]));
        check!(index.term_count() == 2);
    }

    #[test]
    fn test_candidates_intersect_all_tokens() {
        let index = index_of(&[
            "In the beginning God created the heaven",
            "And God said, Let there be light",
            "And God saw the light, that it was good",
        ]);

        check!(index.candidates(&["god"]) == Candidates::Matches(vec![0, 1, 2]));
        check!(index.candidates(&["god", "light"]) == Candidates::Matches(vec![1, 2]));
        check!(index.candidates(&["god", "light", "good"]) == Candidates::Matches(vec![2]));
        check!(index.candidates(&["beginning", "light"]) == Candidates::Matches(vec![]));
    }

    #[test]
    fn test_candidates_token_order_does_not_matter() {
        let index = index_of(&[
            "In the beginning God created the heaven and the earth",
            "And the earth was without form",
            "And God said, Let there be light: and there was light",
            "And God saw the light",
            "And God called the light Day",
        ]);

        let tokens = ["god", "light", "the", "and"];
        let expected = index.candidates(&tokens);
        let_assert!(Candidates::Matches(positions) = &expected);
        check!(positions == &vec![3, 4]);

        let permutations = [
            ["light", "god", "the", "and"],
            ["and", "the", "light", "god"],
            ["the", "and", "god", "light"],
        ];
        for permutation in permutations {
            check!(index.candidates(&permutation) == expected);
        }
    }

    #[test]
    fn test_candidates_absent_token() {
        let index = index_of(&["In the beginning"]);
        check!(index.candidates(&["beginning", "pharaoh"]) == Candidates::Absent("pharaoh".into()));
    }

    #[test]
    fn test_candidates_only_short_tokens() {
        let index = index_of(&["This is a test"]);
        check!(index.candidates(&["is", "a"]) == Candidates::Unfiltered);
        check!(index.candidates::<&str>(&[]) == Candidates::Unfiltered);
    }
}
