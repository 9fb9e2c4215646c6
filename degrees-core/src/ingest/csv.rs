//! CSV reading for the three input tables.
//!
//! Supports both plain CSV and gzip-compressed CSV files (.csv.gz).
//! Columns are located by header name; extra columns are ignored, and a
//! missing required column is a schema error.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use flate2::read::GzDecoder;

use super::{appearance_row, movie_row, parse_year, person_row, Loaded};
use crate::error::{DegreesError, Result};
use crate::types::{Appearance, Movie, Person};

/// Create a CSV reader from a file path, decompressing when `gzip`.
fn open_reader(path: &Path, gzip: bool) -> Result<csv::Reader<Box<dyn Read>>> {
    let file = File::open(path)?;

    let reader: Box<dyn Read> = if gzip {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader))
}

/// Find the index of a required column, returning a schema error if the
/// header row does not contain it.
fn require_column(headers: &csv::StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DegreesError::Schema {
            message: format!(
                "column '{}' not found in CSV headers of {}",
                column,
                path.display()
            ),
        })
}

/// Find the index of an optional column.
fn find_column(headers: &csv::StringRecord, column: &str) -> Option<usize> {
    headers.iter().position(|h| h == column)
}

fn field(record: &csv::StringRecord, index: usize) -> Option<String> {
    record.get(index).map(|s| s.to_string())
}

pub(super) fn read_people(path: &Path, gzip: bool, limit: Option<usize>) -> Result<Loaded<Person>> {
    let mut reader = open_reader(path, gzip)?;
    let headers = reader.headers()?.clone();
    let id_at = require_column(&headers, "id", path)?;
    let name_at = require_column(&headers, "name", path)?;
    let birth_at = find_column(&headers, "birth");

    let mut records = Vec::new();
    let mut skipped = 0;
    for row in reader.records() {
        if limit.is_some_and(|n| records.len() >= n) {
            break;
        }
        let row = row?;
        let birth = birth_at
            .and_then(|i| row.get(i))
            .and_then(parse_year);
        match person_row(field(&row, id_at), field(&row, name_at), birth) {
            Some(person) => records.push(person),
            None => skipped += 1,
        }
    }

    Ok(Loaded { records, skipped })
}

pub(super) fn read_movies(path: &Path, gzip: bool, limit: Option<usize>) -> Result<Loaded<Movie>> {
    let mut reader = open_reader(path, gzip)?;
    let headers = reader.headers()?.clone();
    let id_at = require_column(&headers, "id", path)?;
    let title_at = require_column(&headers, "title", path)?;
    let year_at = find_column(&headers, "year");

    let mut records = Vec::new();
    let mut skipped = 0;
    for row in reader.records() {
        if limit.is_some_and(|n| records.len() >= n) {
            break;
        }
        let row = row?;
        let year = year_at.and_then(|i| row.get(i)).and_then(parse_year);
        match movie_row(field(&row, id_at), field(&row, title_at), year) {
            Some(movie) => records.push(movie),
            None => skipped += 1,
        }
    }

    Ok(Loaded { records, skipped })
}

pub(super) fn read_appearances(
    path: &Path,
    gzip: bool,
    limit: Option<usize>,
) -> Result<Loaded<Appearance>> {
    let mut reader = open_reader(path, gzip)?;
    let headers = reader.headers()?.clone();
    let person_at = require_column(&headers, "person_id", path)?;
    let movie_at = require_column(&headers, "movie_id", path)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    for row in reader.records() {
        if limit.is_some_and(|n| records.len() >= n) {
            break;
        }
        let row = row?;
        match appearance_row(field(&row, person_at), field(&row, movie_at)) {
            Some(appearance) => records.push(appearance),
            None => skipped += 1,
        }
    }

    Ok(Loaded { records, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_people_basic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "people.csv",
            "id,name,birth\np1,Kevin Bacon,1958\np2,Tom Hanks,1956\n",
        );

        let loaded = read_people(&path, false, None).unwrap();
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[0], Person::new("p1", "Kevin Bacon", Some(1958)));
    }

    #[test]
    fn test_read_people_skips_malformed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "people.csv",
            "id,name,birth\np1,Kevin Bacon,1958\n,No Id,1960\np3,,1970\np4,Empty Birth,\n",
        );

        let loaded = read_people(&path, false, None).unwrap();
        assert_eq!(loaded.skipped, 2);
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[1], Person::new("p4", "Empty Birth", None));
    }

    #[test]
    fn test_read_people_column_order_does_not_matter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "people.csv",
            "birth,extra,name,id\n1958,x,Kevin Bacon,p1\n",
        );

        let loaded = read_people(&path, false, None).unwrap();
        assert_eq!(loaded.records, vec![Person::new("p1", "Kevin Bacon", Some(1958))]);
    }

    #[test]
    fn test_read_people_missing_column_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "people.csv", "id,birth\np1,1958\n");

        let err = read_people(&path, false, None).unwrap_err();
        assert!(matches!(err, DegreesError::Schema { .. }));
    }

    #[test]
    fn test_read_people_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "people.csv",
            "id,name,birth\np1,A,\np2,B,\np3,C,\n",
        );

        let loaded = read_people(&path, false, Some(2)).unwrap();
        assert_eq!(loaded.records.len(), 2);
    }

    #[test]
    fn test_read_movies_and_appearances() {
        let dir = tempfile::tempdir().unwrap();
        let movies = write_csv(&dir, "movies.csv", "id,title,year\nm1,Apollo 13,1995\n");
        let stars = write_csv(
            &dir,
            "stars.csv",
            "person_id,movie_id\np1,m1\np2,\n,m1\n",
        );

        let loaded = read_movies(&movies, false, None).unwrap();
        assert_eq!(loaded.records, vec![Movie::new("m1", "Apollo 13", Some(1995))]);

        let loaded = read_appearances(&stars, false, None).unwrap();
        assert_eq!(loaded.records, vec![Appearance::new("p1", "m1")]);
        assert_eq!(loaded.skipped, 2);
    }

    #[test]
    fn test_read_people_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder
            .write_all(b"id,name,birth\np1,Kevin Bacon,1958\n")
            .unwrap();
        encoder.finish().unwrap();

        let loaded = read_people(&path, true, None).unwrap();
        assert_eq!(loaded.records, vec![Person::new("p1", "Kevin Bacon", Some(1958))]);
    }
}
