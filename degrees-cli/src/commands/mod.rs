//! Command implementations for the degrees CLI
//!
//! Each command module provides a `run` function that executes the
//! command logic. Shared here: data source location and graph loading.

pub mod completions;
pub mod find;
pub mod resolve;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use degrees_core::{ingest, DegreesGraph};

use crate::config::DegreesConfig;

/// Extensions probed when locating a table inside a data directory,
/// in preference order.
const SOURCE_EXTENSIONS: &[&str] = &["csv", "csv.gz", "json", "parquet"];

/// Data source options shared by all query commands.
#[derive(Debug, Args)]
pub struct DataOpts {
    /// Directory containing people.*, movies.*, and stars.* tables
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Explicit path to the people table
    #[arg(long, value_name = "FILE")]
    pub people: Option<PathBuf>,

    /// Explicit path to the movies table
    #[arg(long, value_name = "FILE")]
    pub movies: Option<PathBuf>,

    /// Explicit path to the appearances table
    #[arg(long, value_name = "FILE")]
    pub stars: Option<PathBuf>,

    /// Load at most N rows per source (smoke runs on large dumps)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Probe a directory for `<stem>.<ext>` across the supported formats.
fn find_table(dir: &Path, stem: &str) -> Option<PathBuf> {
    SOURCE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|path| path.exists())
}

/// Resolve one table path: explicit flag > config path > directory scan.
fn resolve_source(
    explicit: Option<&PathBuf>,
    configured: Option<&PathBuf>,
    dir: &Path,
    stem: &str,
) -> Result<PathBuf> {
    if let Some(path) = explicit.or(configured) {
        if !path.exists() {
            bail!("Data source not found: {}", path.display());
        }
        return Ok(path.clone());
    }
    find_table(dir, stem).ok_or_else(|| {
        anyhow::anyhow!(
            "No {stem} table found in {} (expected {stem}.csv, .csv.gz, .json, or .parquet). \
             Pass --data-dir or --{stem}, or set [data] in .degreesrc.toml.",
            dir.display()
        )
    })
}

/// Load all three sources and build the graph index.
///
/// The load is fail-fast: if any source is missing or unreadable, no
/// graph is built.
pub fn load_graph(opts: &DataOpts, config: &DegreesConfig) -> Result<DegreesGraph> {
    let dir = opts
        .data_dir
        .clone()
        .or_else(|| config.data.dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let people = resolve_source(
        opts.people.as_ref(),
        config.data.people.as_ref(),
        &dir,
        "people",
    )?;
    let movies = resolve_source(
        opts.movies.as_ref(),
        config.data.movies.as_ref(),
        &dir,
        "movies",
    )?;
    let stars = resolve_source(opts.stars.as_ref(), config.data.stars.as_ref(), &dir, "stars")?;

    let limit = opts.limit.or(config.data.limit);
    let dataset = ingest::load_dataset(&people, &movies, &stars, limit)
        .context("Failed to load data sources")?;

    tracing::debug!(
        people = dataset.people.len(),
        movies = dataset.movies.len(),
        appearances = dataset.appearances.len(),
        skipped = dataset.skipped_rows,
        "dataset loaded"
    );

    Ok(DegreesGraph::build(dataset))
}
