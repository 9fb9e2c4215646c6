//! JSON reading for the three input tables.
//!
//! Expects a top-level array of objects per table, matching the shape
//! produced by common tabular-to-JSON exporters: `{id, name, birth}`,
//! `{id, title, year}`, `{person_id, movie_id}`. Optional year fields
//! may be numbers, strings, or null.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::{appearance_row, movie_row, parse_year, person_row, Loaded};
use crate::error::Result;
use crate::types::{Appearance, Movie, Person};

#[derive(Deserialize)]
struct RawPerson {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    birth: Option<Value>,
}

#[derive(Deserialize)]
struct RawMovie {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    year: Option<Value>,
}

#[derive(Deserialize)]
struct RawAppearance {
    #[serde(default)]
    person_id: Option<String>,
    #[serde(default)]
    movie_id: Option<String>,
}

/// Interpret an optional year that may arrive as a JSON number, a
/// stringified number, or null. Negative or out-of-range numbers
/// become `None` rather than a truncated year.
fn year_value(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .filter(|&y| y <= u64::from(u32::MAX))
            .map(|y| y as u32),
        Value::String(s) => parse_year(s),
        _ => None,
    }
}

fn read_array<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub(super) fn read_people(path: &Path, limit: Option<usize>) -> Result<Loaded<Person>> {
    let raw: Vec<RawPerson> = read_array(path)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    for row in raw {
        if limit.is_some_and(|n| records.len() >= n) {
            break;
        }
        let birth = year_value(row.birth.as_ref());
        match person_row(row.id, row.name, birth) {
            Some(person) => records.push(person),
            None => skipped += 1,
        }
    }

    Ok(Loaded { records, skipped })
}

pub(super) fn read_movies(path: &Path, limit: Option<usize>) -> Result<Loaded<Movie>> {
    let raw: Vec<RawMovie> = read_array(path)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    for row in raw {
        if limit.is_some_and(|n| records.len() >= n) {
            break;
        }
        let year = year_value(row.year.as_ref());
        match movie_row(row.id, row.title, year) {
            Some(movie) => records.push(movie),
            None => skipped += 1,
        }
    }

    Ok(Loaded { records, skipped })
}

pub(super) fn read_appearances(path: &Path, limit: Option<usize>) -> Result<Loaded<Appearance>> {
    let raw: Vec<RawAppearance> = read_array(path)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    for row in raw {
        if limit.is_some_and(|n| records.len() >= n) {
            break;
        }
        match appearance_row(row.person_id, row.movie_id) {
            Some(appearance) => records.push(appearance),
            None => skipped += 1,
        }
    }

    Ok(Loaded { records, skipped })
}
