//! Named translations, loaded lazily and cached for the life of the registry.

use crate::bible::Bible;
use crate::config::TRANSLATION_SUFFIX;
use crate::error::{self, LoadError};
use anyhow::Context;
use ignore::WalkBuilder;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

/// Where a translation's source document comes from.
#[derive(Clone)]
pub enum TranslationSource {
    /// A JSON file, read on first access.
    File(PathBuf),
    /// A document already in memory.
    Bytes(Arc<[u8]>),
}

impl fmt::Debug for TranslationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

/// Translations by name.
///
/// Each translation is parsed and indexed the first time it is requested and
/// then kept until the registry is dropped. Concurrent first requests for the
/// same name construct it once; every caller receives the same `Arc<Bible>`.
/// Failed loads are not cached.
#[derive(Default)]
pub struct TranslationRegistry {
    sources: BTreeMap<String, TranslationSource>,
    loaded: RwLock<HashMap<String, Arc<Bible>>>,
    /// Held while constructing, so two callers never build the same translation.
    loading: Mutex<()>,
}

impl fmt::Debug for TranslationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationRegistry")
            .field("translations", &self.sources.keys().collect::<Vec<_>>())
            .field("loaded_count", &self.loaded_count())
            .finish()
    }
}

impl TranslationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every `<NAME>_bible.json` file directly inside `dir`.
    ///
    /// Fails if `dir` is not a readable directory or holds no translation
    /// files. Subdirectories and other files are ignored.
    pub fn discover(dir: &Path) -> error::Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("Translations directory {} does not exist", dir.display());
        }

        let mut registry = Self::new();
        let walker = WalkBuilder::new(dir)
            .max_depth(Some(1))
            .standard_filters(false)
            .build();

        for entry in walker {
            let entry = entry
                .with_context(|| format!("Failed to read translations directory {}", dir.display()))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if let Some(name) = translation_name(entry.path()) {
                tracing::debug!("Found translation '{}' at {}", name, entry.path().display());
                registry.register_file(name, entry.path());
            }
        }

        if registry.is_empty() {
            anyhow::bail!(
                "No translation files found in {} (expected files like KJV{})",
                dir.display(),
                TRANSLATION_SUFFIX
            );
        }

        tracing::info!(
            "Discovered {} translations in {}",
            registry.sources.len(),
            dir.display()
        );
        Ok(registry)
    }

    /// Register a translation file. Replaces any earlier source of that name.
    pub fn register_file(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.register(name.into(), TranslationSource::File(path.into()));
    }

    /// Register an in-memory document. Replaces any earlier source of that name.
    pub fn register_bytes(&mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.register(name.into(), TranslationSource::Bytes(bytes.into()));
    }

    fn register(&mut self, name: String, source: TranslationSource) {
        self.loaded
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&name);
        self.sources.insert(name, source);
    }

    /// Translation names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Whether a translation has already been constructed.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.read_loaded().contains_key(name)
    }

    pub fn loaded_count(&self) -> usize {
        self.read_loaded().len()
    }

    /// Get a translation, loading it on first access.
    pub fn get(&self, name: &str) -> Result<Arc<Bible>, LoadError> {
        if let Some(bible) = self.read_loaded().get(name) {
            tracing::debug!("Cache hit for translation '{}'", name);
            return Ok(Arc::clone(bible));
        }

        let source = self
            .sources
            .get(name)
            .ok_or_else(|| LoadError::UnknownTranslation {
                name: name.to_string(),
            })?;

        let _guard = self.loading.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished loading while we waited.
        if let Some(bible) = self.read_loaded().get(name) {
            return Ok(Arc::clone(bible));
        }

        let bible = Arc::new(load(name, source)?);
        self.loaded
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Arc::clone(&bible));

        Ok(bible)
    }

    /// Get `name`, or fall back to the first translation (by name) if `name`
    /// cannot be loaded.
    ///
    /// Returns the name actually loaded alongside it, or `None` if neither
    /// could be loaded.
    pub fn get_or_fallback(&self, name: &str) -> Option<(String, Arc<Bible>)> {
        match self.get(name) {
            Ok(bible) => return Some((name.to_string(), bible)),
            Err(e) => tracing::warn!("{}", e),
        }

        let fallback = self.sources.keys().next()?;
        if fallback == name {
            return None;
        }

        tracing::warn!("Falling back to translation '{}'", fallback);
        match self.get(fallback) {
            Ok(bible) => Some((fallback.clone(), bible)),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    fn read_loaded(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Bible>>> {
        self.loaded.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Translation name for a file called `<NAME>_bible.json`.
pub fn translation_name(path: &Path) -> Option<&str> {
    path.file_name()?
        .to_str()?
        .strip_suffix(TRANSLATION_SUFFIX)
        .filter(|name| !name.is_empty())
}

fn load(name: &str, source: &TranslationSource) -> Result<Bible, LoadError> {
    let start = Instant::now();
    tracing::info!("Loading translation '{}'", name);

    let bytes: Arc<[u8]> = match source {
        TranslationSource::Bytes(bytes) => Arc::clone(bytes),
        TranslationSource::File(path) => std::fs::read(path)
            .map_err(|source| LoadError::Io {
                name: name.to_string(),
                path: path.clone(),
                source,
            })?
            .into(),
    };

    let bible = Bible::from_json(&bytes).map_err(|source| LoadError::Parse {
        name: name.to_string(),
        source,
    })?;

    tracing::debug!("Translation '{}' ready in {:?}", name, start.elapsed());
    Ok(bible)
}
