//! Configuration: where translations live and which one to open.
//!
//! Values are resolved from, in order of precedence: command-line flags (and
//! their environment variables), `config.toml` in the config directory, and
//! built-in defaults.

use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory.
pub const APP_DIR: &str = "bible-search";

/// Translation files are named `<NAME>` + this suffix, e.g. `KJV_bible.json`.
pub const TRANSLATION_SUFFIX: &str = "_bible.json";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Directory holding `<NAME>_bible.json` files. `~` is expanded.
    pub translations_dir: Option<String>,
    /// Translation opened when none is requested.
    pub default_translation: Option<String>,
}

impl FileConfig {
    /// Parse `config.toml` contents.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config.toml")
    }

    /// Read a config file. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!("Loaded config from {}", path.display());
                Self::parse(&content).with_context(|| format!("Failed to load {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read config file {}", path.display()))
            }
        }
    }
}

/// Values given explicitly on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub translations_dir: Option<PathBuf>,
    pub translation: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub translations_dir: PathBuf,
    pub default_translation: Option<String>,
}

impl Config {
    /// Resolve configuration from overrides, the config file and defaults.
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let config_file = match &overrides.config_file {
            Some(path) => path.clone(),
            None => config_dir()?.join("config.toml"),
        };
        let file = FileConfig::load(&config_file)?;
        Self::merge(overrides, file, || Ok(config_dir()?.join("translations")))
    }

    /// Merge layers; `default_dir` is only consulted when no layer names a
    /// translations directory.
    pub fn merge(
        overrides: &Overrides,
        file: FileConfig,
        default_dir: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        let translations_dir = match (&overrides.translations_dir, file.translations_dir) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) => PathBuf::from(&*expand_tilde(&dir)),
            (None, None) => default_dir()?,
        };

        Ok(Self {
            translations_dir,
            default_translation: overrides
                .translation
                .clone()
                .or(file.default_translation),
        })
    }
}

/// `<config dir>/bible-search`, honoring `XDG_CONFIG_HOME` on Linux.
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("Could not determine the user config directory")
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
