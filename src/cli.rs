//! Command-line front end over the read-only query surface.

use crate::bible::Bible;
use crate::config::{Config, Overrides};
use crate::error::Result;
use crate::registry::TranslationRegistry;
use crate::search::{ReferenceQuery, SearchOutcome};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Number of book suggestions shown for an unknown book.
const SUGGESTION_LIMIT: usize = 3;

#[derive(Debug, Parser)]
#[command(name = "bible-search")]
#[command(about = "Read and search Bible translations", long_about = None, version)]
pub struct Cli {
    /// Directory containing <NAME>_bible.json files
    #[arg(long, env = "BIBLE_SEARCH_DIR", global = true)]
    pub translations_dir: Option<PathBuf>,
    /// Translation to use (defaults to the configured one, then the first found)
    #[arg(short, long, env = "BIBLE_SEARCH_TRANSLATION", global = true)]
    pub translation: Option<String>,
    /// Path to config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List available translations
    Translations,
    /// List the books of a translation
    Books,
    /// Print a chapter, e.g. `chapter 1 John 4` or `chapter gen 1`
    Chapter {
        #[arg(required = true, num_args = 1..)]
        reference: Vec<String>,
    },
    /// Search by reference or keywords, e.g. `search John 3:16` or `search let there be light`
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(short = 'n', long, default_value = "25")]
        limit: usize,
        /// Print results as JSON
        #[arg(long, conflicts_with = "explain")]
        json: bool,
        /// Show the strategy and score of every hit
        #[arg(long)]
        explain: bool,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config_file: self.config.clone(),
            translations_dir: self.translations_dir.clone(),
            translation: self.translation.clone(),
        }
    }
}

/// Execute a parsed command line, writing results to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = Config::resolve(&cli.overrides())?;
    let registry = TranslationRegistry::discover(&config.translations_dir)?;

    match &cli.command {
        Commands::Translations => {
            for name in registry.names() {
                writeln!(out, "{}", name)?;
            }
        }
        Commands::Books => {
            let (_, bible) = open_translation(&registry, &config)?;
            for book in bible.list_books() {
                writeln!(out, "{}", book)?;
            }
        }
        Commands::Chapter { reference } => {
            let (_, bible) = open_translation(&registry, &config)?;
            print_chapter(&bible, &reference.join(" "), out)?;
        }
        Commands::Search {
            query,
            limit,
            json,
            explain,
        } => {
            let (_, bible) = open_translation(&registry, &config)?;
            let outcome = bible.search_detailed(&query.join(" "));
            print_search(&outcome, *limit, *json, *explain, out)?;
        }
    }

    Ok(())
}

/// Open the requested (or configured, or first) translation.
fn open_translation(
    registry: &TranslationRegistry,
    config: &Config,
) -> Result<(String, Arc<Bible>)> {
    let requested = match &config.default_translation {
        Some(name) => name.as_str(),
        None => registry
            .names()
            .first()
            .copied()
            .context("No translations available")?,
    };

    registry.get_or_fallback(requested).with_context(|| {
        format!(
            "Could not load translation '{}' or any fallback (available: {})",
            requested,
            registry.names().join(", ")
        )
    })
}

fn print_chapter(bible: &Bible, reference: &str, out: &mut impl Write) -> Result<()> {
    let reference = ReferenceQuery::parse(reference).context("Expected a book name")?;

    let Some(book) = bible.find_book(&reference.book) else {
        let suggestions: Vec<_> = bible
            .suggest_books(&reference.book, SUGGESTION_LIMIT)
            .into_iter()
            .map(|s| s.book)
            .collect();
        anyhow::bail!(
            "Unknown book '{}'. Did you mean: {}?",
            reference.book,
            suggestions.join(", ")
        );
    };

    let chapter = match reference.chapter {
        Some(chapter) => chapter,
        None => bible
            .chapters_in(book)
            .first()
            .copied()
            .with_context(|| format!("{} has no chapters", book))?,
    };

    let verses = bible.verses_in_chapter(book, chapter);
    if verses.is_empty() {
        anyhow::bail!("{} has no chapter {}", book, chapter);
    }

    writeln!(out, "{} {}", book, chapter)?;
    for verse in verses {
        writeln!(out, "{:>3}  {}", verse.verse, verse.text)?;
    }
    Ok(())
}

fn print_search(
    outcome: &SearchOutcome<'_>,
    limit: usize,
    json: bool,
    explain: bool,
    out: &mut impl Write,
) -> Result<()> {
    let hits = &outcome.hits[..outcome.len().min(limit)];

    if json {
        let verses: Vec<_> = hits.iter().map(|hit| hit.verse).collect();
        serde_json::to_writer_pretty(&mut *out, &verses).context("Failed to write JSON")?;
        writeln!(out)?;
        return Ok(());
    }

    if explain {
        writeln!(
            out,
            "strategy: {}, {} hits (showing {})",
            outcome.strategy,
            outcome.len(),
            hits.len()
        )?;
    }

    if hits.is_empty() {
        writeln!(out, "No results found")?;
        return Ok(());
    }

    for hit in hits {
        write!(out, "{}  {}", hit.verse, hit.verse.text)?;
        if explain && let Some(score) = hit.score {
            write!(out, "  [{}]", score)?;
        }
        writeln!(out)?;
    }

    Ok(())
}
