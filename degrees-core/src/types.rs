//! Data models for people, movies, and appearance records.
//!
//! These types represent one normalized row each of the three input
//! tables, plus the hop-chain element returned by connection queries.
//! They are format-agnostic: the CSV, JSON, and Parquet loaders all
//! produce the same records.

use serde::{Deserialize, Serialize};

/// A person row: opaque stable id, display name, optional birth year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    /// Birth year, or `None` when the source field is absent or empty.
    /// Never an empty-string sentinel, so "unknown year" and "year zero"
    /// cannot be confused downstream.
    pub birth: Option<u32>,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>, birth: Option<u32>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth,
        }
    }
}

/// A movie row: opaque id, title, optional release year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: Option<u32>,
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: Option<u32>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year,
        }
    }
}

/// An appearance row: unordered (person, movie) pair meaning the person
/// appeared in the movie. Duplicate pairs are idempotent at index build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub person_id: String,
    pub movie_id: String,
}

impl Appearance {
    pub fn new(person_id: impl Into<String>, movie_id: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            movie_id: movie_id.into(),
        }
    }
}

/// A completed ingestion batch: the three record sequences plus the
/// count of malformed rows the loaders skipped.
///
/// The graph index is built from a `Dataset` exactly once; a dataset is
/// only produced when all three sources loaded successfully (fail-fast,
/// no partial state).
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub people: Vec<Person>,
    pub movies: Vec<Movie>,
    pub appearances: Vec<Appearance>,
    /// Rows dropped during ingestion for missing required fields.
    pub skipped_rows: usize,
}

/// One link of a connection chain: `person_a` and `person_b` appeared
/// together in `movie`. A full chain is an ordered `Vec<Hop>` from the
/// source person to the target; its length is the degrees of separation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub person_a: String,
    pub movie: String,
    pub person_b: String,
}

impl Hop {
    pub fn new(
        person_a: impl Into<String>,
        movie: impl Into<String>,
        person_b: impl Into<String>,
    ) -> Self {
        Self {
            person_a: person_a.into(),
            movie: movie.into(),
            person_b: person_b.into(),
        }
    }
}
