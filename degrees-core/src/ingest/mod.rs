//! Record ingestion for the three input tables.
//!
//! Loads people, movies, and appearance ("stars") records from CSV
//! (optionally gzip-compressed), JSON, or Parquet sources. The format is
//! chosen by file extension and has no effect on the records produced:
//! every loader yields the same typed rows.
//!
//! Row policy: a row missing a required field (`id`, `name`/`title`, or
//! either appearance endpoint) is skipped and counted, never fatal. An
//! unreadable source or a missing required column aborts the whole load,
//! so a partial dataset never escapes.

use std::path::Path;

use crate::error::{DegreesError, Result};
use crate::types::{Appearance, Dataset, Movie, Person};

mod csv;
mod json;
mod parquet;

/// Records loaded from one source, plus the number of rows skipped for
/// missing required fields.
#[derive(Clone, Debug)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Supported source encodings, detected from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    CsvGz,
    Json,
    Parquet,
}

/// Detect the source format from a path's extension.
pub fn detect_format(path: &Path) -> Result<SourceFormat> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if name.ends_with(".csv.gz") {
        Ok(SourceFormat::CsvGz)
    } else if name.ends_with(".csv") {
        Ok(SourceFormat::Csv)
    } else if name.ends_with(".json") {
        Ok(SourceFormat::Json)
    } else if name.ends_with(".parquet") {
        Ok(SourceFormat::Parquet)
    } else {
        Err(DegreesError::UnknownFormat {
            path: path.display().to_string(),
        })
    }
}

/// Load person records from a CSV, JSON, or Parquet source.
pub fn load_people(path: &Path, limit: Option<usize>) -> Result<Loaded<Person>> {
    let loaded = match detect_format(path)? {
        SourceFormat::Csv => csv::read_people(path, false, limit)?,
        SourceFormat::CsvGz => csv::read_people(path, true, limit)?,
        SourceFormat::Json => json::read_people(path, limit)?,
        SourceFormat::Parquet => parquet::read_people(path, limit)?,
    };
    tracing::debug!(
        records = loaded.records.len(),
        skipped = loaded.skipped,
        "loaded people from {}",
        path.display()
    );
    Ok(loaded)
}

/// Load movie records from a CSV, JSON, or Parquet source.
pub fn load_movies(path: &Path, limit: Option<usize>) -> Result<Loaded<Movie>> {
    let loaded = match detect_format(path)? {
        SourceFormat::Csv => csv::read_movies(path, false, limit)?,
        SourceFormat::CsvGz => csv::read_movies(path, true, limit)?,
        SourceFormat::Json => json::read_movies(path, limit)?,
        SourceFormat::Parquet => parquet::read_movies(path, limit)?,
    };
    tracing::debug!(
        records = loaded.records.len(),
        skipped = loaded.skipped,
        "loaded movies from {}",
        path.display()
    );
    Ok(loaded)
}

/// Load appearance records from a CSV, JSON, or Parquet source.
pub fn load_appearances(path: &Path, limit: Option<usize>) -> Result<Loaded<Appearance>> {
    let loaded = match detect_format(path)? {
        SourceFormat::Csv => csv::read_appearances(path, false, limit)?,
        SourceFormat::CsvGz => csv::read_appearances(path, true, limit)?,
        SourceFormat::Json => json::read_appearances(path, limit)?,
        SourceFormat::Parquet => parquet::read_appearances(path, limit)?,
    };
    tracing::debug!(
        records = loaded.records.len(),
        skipped = loaded.skipped,
        "loaded appearances from {}",
        path.display()
    );
    Ok(loaded)
}

/// Load all three sources into a [`Dataset`], failing fast if any of
/// them cannot be read. No partial dataset is returned.
pub fn load_dataset(
    people: &Path,
    movies: &Path,
    appearances: &Path,
    limit: Option<usize>,
) -> Result<Dataset> {
    let people = load_people(people, limit)?;
    let movies = load_movies(movies, limit)?;
    let appearances = load_appearances(appearances, limit)?;

    Ok(Dataset {
        skipped_rows: people.skipped + movies.skipped + appearances.skipped,
        people: people.records,
        movies: movies.records,
        appearances: appearances.records,
    })
}

/// Parse an optional year field. Empty or unparsable values become
/// `None`; a float form like "1995.0" (common in re-exported tables)
/// is accepted. The float fallback only admits finite non-negative
/// whole values that fit in `u32`, so out-of-range or fractional input
/// stays `None` instead of saturating to a bogus year.
pub(crate) fn parse_year(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(year) = trimmed.parse::<u32>() {
        return Some(year);
    }
    match trimmed.parse::<f64>() {
        Ok(y) if y.is_finite() && y >= 0.0 && y.fract() == 0.0 && y <= u32::MAX as f64 => {
            Some(y as u32)
        }
        _ => None,
    }
}

/// Validate one person row. `None` means the row is malformed and must
/// be skipped.
pub(crate) fn person_row(
    id: Option<String>,
    name: Option<String>,
    birth: Option<u32>,
) -> Option<Person> {
    let id = non_empty(id)?;
    let name = non_empty(name)?;
    Some(Person { id, name, birth })
}

/// Validate one movie row.
pub(crate) fn movie_row(
    id: Option<String>,
    title: Option<String>,
    year: Option<u32>,
) -> Option<Movie> {
    let id = non_empty(id)?;
    let title = non_empty(title)?;
    Some(Movie { id, title, year })
}

/// Validate one appearance row.
pub(crate) fn appearance_row(
    person_id: Option<String>,
    movie_id: Option<String>,
) -> Option<Appearance> {
    let person_id = non_empty(person_id)?;
    let movie_id = non_empty(movie_id)?;
    Some(Appearance {
        person_id,
        movie_id,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
