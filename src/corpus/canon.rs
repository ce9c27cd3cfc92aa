//! Canonical book order.

/// The 66 books in Protestant canonical reading order.
///
/// Spellings follow the translation files this crate consumes (`Psalm`,
/// `Song Of Solomon`). Books not listed here are ordered after these.
pub const CANONICAL_BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalm",
    "Proverbs",
    "Ecclesiastes",
    "Song Of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Order books: canonical books first in canonical order, then everything else
/// in the order given.
///
/// Duplicate names in `names` appear once, at their first position.
pub fn canonical_order<'a, I>(names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = names.into_iter().collect();

    let mut ordered: Vec<&str> = CANONICAL_BOOKS
        .iter()
        .copied()
        .filter(|book| present.contains(book))
        .collect();

    for name in present {
        if !ordered.contains(&name) {
            ordered.push(name);
        }
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[test]
    fn test_canon_has_no_duplicates() {
        for (i, book) in CANONICAL_BOOKS.iter().enumerate() {
            check!(!CANONICAL_BOOKS[i + 1..].contains(book), "duplicate {}", book);
        }
    }

    #[rstest]
    #[case(&["Revelation", "Genesis"], &["Genesis", "Revelation"])]
    #[case(&["Tobit", "John", "Genesis"], &["Genesis", "John", "Tobit"])]
    #[case(&["Tobit", "Judith", "Exodus"], &["Exodus", "Tobit", "Judith"])]
    #[case(&["Judith", "Tobit"], &["Judith", "Tobit"])]
    #[case(&["Tobit", "Tobit", "Ruth"], &["Ruth", "Tobit"])]
    #[case(&[], &[])]
    fn test_canonical_order(#[case] input: &[&str], #[case] expected: &[&str]) {
        check!(canonical_order(input.iter().copied()) == expected);
    }

    #[test]
    fn test_case_sensitive_names_are_not_canonical() {
        // "genesis" is not the canonical spelling, so it is treated as an extra book.
        check!(canonical_order(["genesis", "Exodus"]) == ["Exodus", "genesis"]);
    }
}
