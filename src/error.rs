//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for application-level plumbing (config, CLI).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a source document does not have the
/// `{ book: { chapter: { verse: text } } }` shape.
#[derive(Debug, thiserror::Error)]
#[error("malformed translation document: {0}")]
pub struct ParseError(#[from] serde_json::Error);

impl ParseError {
    /// Line of the document where decoding failed (1-based, 0 if unknown).
    pub fn line(&self) -> usize {
        self.0.line()
    }
}

/// Error returned when the registry fails to load a translation.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No translation with this name was registered or discovered.
    #[error("unknown translation '{name}'")]
    UnknownTranslation { name: String },
    /// The translation file could not be read.
    #[error("failed to read translation '{name}' from {}: {source}", path.display())]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The translation file was read but is not a valid document.
    #[error("failed to load translation '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    /// Name of the translation that failed to load.
    pub fn translation(&self) -> &str {
        match self {
            Self::UnknownTranslation { name } | Self::Io { name, .. } | Self::Parse { name, .. } => {
                name
            }
        }
    }
}
