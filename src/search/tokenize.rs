//! Text tokenization shared by indexing and querying.

/// Tokens of this many characters or fewer are never indexed.
pub const MIN_TOKEN_LENGTH: usize = 2;

/// Characters stripped from both ends of every word.
pub const TRIM_CHARS: &[char] = &['.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']'];

/// Strips leading and trailing punctuation from a single word.
///
/// Inner punctuation is kept: `"don't"` stays `don't`, `"(Selah.)"` becomes `Selah`.
pub fn clean_word(word: &str) -> &str {
    word.trim_matches(TRIM_CHARS)
}

/// Whether a cleaned token is long enough to appear in the index.
pub fn is_indexable(token: &str) -> bool {
    token.chars().count() > MIN_TOKEN_LENGTH
}

/// Lowercases and splits text into cleaned tokens, in order, including short
/// ones. Tokens that clean down to nothing are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(clean_word)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokens of `text` that the index stores: cleaned, lowercased and longer
/// than [`MIN_TOKEN_LENGTH`].
pub fn index_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| is_indexable(token))
        .collect()
}
