//! Source document decoding.
//!
//! A translation file is a JSON object three levels deep:
//! `{ "Genesis": { "1": { "1": "In the beginning..." } } }`. Decoding is
//! schema-checked by serde; any other shape is a [`ParseError`].

use crate::error::ParseError;
use ahash::AHashMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// String-keyed entries in document order.
///
/// Unlike a hash map this keeps the order keys appear in the source, which
/// decides where non-canonical books land. A repeated key keeps its first
/// position and takes the last value, like a JSON object would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedEntries<T>(Vec<(String, T)>);

impl<T> OrderedEntries<T> {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, value)| value)
    }
}

impl<T> Default for OrderedEntries<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> FromIterator<(String, T)> for OrderedEntries<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut entries = Vec::new();
        let mut positions: AHashMap<String, usize> = AHashMap::new();
        for (key, value) in iter {
            if let Some(&pos) = positions.get(&key) {
                entries[pos] = (key, value);
            } else {
                positions.insert(key.clone(), entries.len());
                entries.push((key, value));
            }
        }
        Self(entries)
    }
}

impl<'de, T> Deserialize<'de> for OrderedEntries<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for EntriesVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = OrderedEntries<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with string keys")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(entries.into_iter().collect())
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// verse number → text, as written in the source.
pub type RawChapter = OrderedEntries<String>;
/// chapter number → verses, as written in the source.
pub type RawBook = OrderedEntries<RawChapter>;

/// A decoded translation document: book name → chapters → verses.
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    books: OrderedEntries<RawBook>,
}

impl SourceDocument {
    /// Decode a document from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ParseError> {
        let books = serde_json::from_slice(bytes)?;
        Ok(Self { books })
    }

    /// Book names in the order they appear in the document.
    pub fn book_names(&self) -> impl Iterator<Item = &str> {
        self.books.iter().map(|(name, _)| name)
    }

    pub fn book(&self, name: &str) -> Option<&RawBook> {
        self.books.get(name)
    }
}

/// Parse a chapter or verse key.
///
/// Keys must be non-negative decimal integers. Anything else returns `None` and
/// the entry is dropped from the corpus: translation files are occasionally
/// dirty and one bad key must not reject the whole translation.
pub fn parse_numeric_key(key: &str) -> Option<u32> {
    match key.parse::<u32>() {
        Ok(number) => Some(number),
        Err(_) => {
            tracing::trace!("Skipping non-numeric key {:?}", key);
            None
        }
    }
}

/// Re-key entries by their numeric key, ascending.
///
/// Non-numeric keys are skipped. When two keys parse to the same number
/// (`"1"` and `"01"`), the first one in document order is kept.
pub fn numbered<T>(entries: &OrderedEntries<T>) -> BTreeMap<u32, &T> {
    let mut numbered = BTreeMap::new();
    for (key, value) in entries.iter() {
        if let Some(number) = parse_numeric_key(key) {
            numbered.entry(number).or_insert(value);
        }
    }
    numbered
}
