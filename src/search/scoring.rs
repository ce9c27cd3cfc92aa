//! Search relevance and ranking.
//!
//! A verse either matches a pattern or it does not; when it matches, the
//! [`Score`] says how well. Lower scores rank first.

use super::tokenize::clean_word;
use std::cmp::Ordering;
use std::fmt;

/// How a pattern matched, best tier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// The pattern was empty and matches everything.
    EmptyPattern,
    /// The whole pattern occurs verbatim (ignoring case) in the text.
    Substring,
    /// A word of the text starts with the pattern.
    WordPrefix,
    /// A word of the text contains the pattern.
    WordContains,
}

/// Relevance of a match: tier first, then position within the text.
///
/// For [`MatchTier::Substring`] the position is the character offset of the
/// first occurrence; for the word tiers it is the index of the matching word.
/// Ordering compares tiers before positions, so a substring match late in a
/// long verse still outranks any word match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Score {
    pub tier: MatchTier,
    pub position: usize,
}

impl Score {
    /// The best possible score.
    pub const BEST: Self = Self {
        tier: MatchTier::EmptyPattern,
        position: 0,
    };

    pub const fn new(tier: MatchTier, position: usize) -> Self {
        Self { tier, position }
    }

    /// Flat numeric rank: the position, offset by 100 for word-prefix matches
    /// and 500 for word-contains matches. Only used for display.
    pub const fn rank(&self) -> usize {
        match self.tier {
            MatchTier::EmptyPattern => 0,
            MatchTier::Substring => self.position,
            MatchTier::WordPrefix => 100 + self.position,
            MatchTier::WordContains => 500 + self.position,
        }
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tier
            .cmp(&other.tier)
            .then_with(|| self.position.cmp(&other.position))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tier = match self.tier {
            MatchTier::EmptyPattern => "any",
            MatchTier::Substring => "substring",
            MatchTier::WordPrefix => "word-prefix",
            MatchTier::WordContains => "word-contains",
        };
        write!(f, "{}@{} (rank {})", tier, self.position, self.rank())
    }
}

/// Matches `pattern` against `text` case-insensitively and scores the match.
///
/// Returns `None` when the text does not match:
/// - an empty pattern matches with [`Score::BEST`]
/// - otherwise the first occurrence of the whole pattern wins
/// - otherwise the first word (punctuation trimmed) that starts with or
///   contains the pattern wins
pub fn fuzzy_match(text: &str, pattern: &str) -> Option<Score> {
    if pattern.is_empty() {
        return Some(Score::BEST);
    }

    let text_lower = text.to_lowercase();
    let pattern_lower = pattern.to_lowercase();

    if let Some(byte_idx) = text_lower.find(&pattern_lower) {
        let offset = text_lower[..byte_idx].chars().count();
        return Some(Score::new(MatchTier::Substring, offset));
    }

    text_lower
        .split_whitespace()
        .map(clean_word)
        .enumerate()
        .find_map(|(i, word)| {
            if word.starts_with(&pattern_lower) {
                Some(Score::new(MatchTier::WordPrefix, i))
            } else if word.contains(&pattern_lower) {
                Some(Score::new(MatchTier::WordContains, i))
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[rstest]
    #[case("In the beginning", "beginning", 7)]
    #[case("In the beginning", "BEGINNING", 7)]
    #[case("In the beginning", "in", 0)]
    #[case("In the beginning", "the beg", 3)]
    #[case("Ἐν ἀρχῇ ἦν ὁ λόγος", "λόγος", 13)]
    fn test_substring_tier(#[case] text: &str, #[case] pattern: &str, #[case] offset: usize) {
        let_assert!(Some(score) = fuzzy_match(text, pattern));
        check!(score.tier == MatchTier::Substring);
        check!(score.position == offset);
        check!(score.rank() == offset);
    }

    #[test]
    fn test_empty_pattern_matches_best() {
        check!(fuzzy_match("anything at all", "") == Some(Score::BEST));
        check!(fuzzy_match("", "") == Some(Score::BEST));
    }

    #[rstest]
    #[case("In the beginning", "genesis")]
    #[case("", "light")]
    #[case("Jesus wept.", "wept!")]
    fn test_no_match(#[case] text: &str, #[case] pattern: &str) {
        check!(fuzzy_match(text, pattern).is_none());
    }

    #[test]
    fn test_tiers_are_strictly_ordered() {
        let late_substring = Score::new(MatchTier::Substring, 10_000);
        let early_prefix = Score::new(MatchTier::WordPrefix, 0);
        let early_contains = Score::new(MatchTier::WordContains, 0);

        check!(Score::BEST < late_substring);
        check!(late_substring < early_prefix);
        check!(early_prefix < early_contains);
        check!(Score::new(MatchTier::WordPrefix, 1) < Score::new(MatchTier::WordPrefix, 2));
    }

    #[test]
    fn test_rank_offsets() {
        check!(Score::new(MatchTier::WordPrefix, 3).rank() == 103);
        check!(Score::new(MatchTier::WordContains, 3).rank() == 503);
        check!(Score::BEST.rank() == 0);
    }

    #[test]
    fn test_display() {
        check!(Score::new(MatchTier::Substring, 7).to_string() == "substring@7 (rank 7)");
        check!(Score::new(MatchTier::WordPrefix, 2).to_string() == "word-prefix@2 (rank 102)");
    }

    #[test]
    fn test_earlier_occurrence_ranks_higher() {
        let_assert!(Some(early) = fuzzy_match("light shone in darkness", "light"));
        let_assert!(Some(late) = fuzzy_match("God saw the light", "light"));
        check!(early < late);
    }
}
