//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_bible`: the `tests/fixtures/KJV_bible.json` translation, which
//!   mixes books out of canonical order, includes a non-canonical book and
//!   carries a few non-numeric keys that must be skipped
//! - `genesis_bible`: the three-verse Genesis document used in the docs
//! - `translations_dir`: a temp directory holding `KJV` and `ASV` files
//!
//! [`TempWorkspace`] provides a reusable temp directory abstraction for any test
//! that needs filesystem isolation.

use bible_search::{Bible, Verse};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The sample KJV translation.
pub const SAMPLE: &str = include_str!("../fixtures/KJV_bible.json");

/// A minimal one-book translation.
#[allow(dead_code)]
pub const GENESIS: &str = r#"{
  "Genesis": {
    "1": {
      "1": "In the beginning God created the heaven and the earth.",
      "2": "And the earth was without form, and void.",
      "3": "And God said, Let there be light: and there was light."
    }
  }
}"#;

/// A temporary directory for test isolation.
///
/// Cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Writes `<name>_bible.json` at the workspace root.
    pub fn create_translation(&self, name: &str, content: &str) {
        self.create_file(&format!("{}_bible.json", name), content);
    }
}

#[allow(dead_code)]
#[fixture]
pub fn sample_bible() -> Bible {
    Bible::from_json(SAMPLE.as_bytes()).expect("sample translation should parse")
}

#[allow(dead_code)]
#[fixture]
pub fn genesis_bible() -> Bible {
    Bible::from_json(GENESIS.as_bytes()).expect("Genesis document should parse")
}

/// A translations directory with `KJV` (the sample) and `ASV` (Genesis only),
/// plus files discovery must skip.
#[allow(dead_code)]
#[fixture]
pub fn translations_dir() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    workspace.create_translation("KJV", SAMPLE);
    workspace.create_translation("ASV", GENESIS);
    workspace.create_file("notes.txt", "not a translation");
    workspace.create_file("archive/WEB_bible.json", GENESIS);
    workspace
}

/// `Book c:v` for each verse, for compact assertions.
#[allow(dead_code)]
pub fn refs<'a>(verses: impl IntoIterator<Item = &'a Verse>) -> Vec<String> {
    verses.into_iter().map(Verse::reference).collect()
}
