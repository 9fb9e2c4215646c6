//! Display-ready rendering of connection chains.
//!
//! Resolves the ids in a hop chain against the index's person and movie
//! tables. Every id in a chain was produced by the index itself, so a
//! failed lookup here is a bug in the index build, not a user-facing
//! condition; the resolution panics rather than returning an error.

use std::fmt;

use serde::Serialize;

use crate::graph::DegreesGraph;
use crate::types::Hop;

/// One display record per hop of a connection chain.
#[derive(Clone, Debug, Serialize)]
pub struct ChainStep {
    pub source_id: String,
    pub source_name: String,
    pub movie_id: String,
    pub movie_title: String,
    pub movie_year: Option<u32>,
    pub target_id: String,
    pub target_name: String,
}

impl fmt::Display for ChainStep {
    /// Renders as `A and B starred in "Title" (1995)`; the year is
    /// omitted when unknown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} and {} starred in \"{}\"",
            self.source_name, self.target_name, self.movie_title
        )?;
        if let Some(year) = self.movie_year {
            write!(f, " ({year})")?;
        }
        Ok(())
    }
}

/// Resolve a hop chain into display records using the graph's tables.
pub fn describe_chain(graph: &DegreesGraph, hops: &[Hop]) -> Vec<ChainStep> {
    hops.iter()
        .map(|hop| {
            let source = graph
                .person(&hop.person_a)
                .expect("chain references a person id missing from the index");
            let target = graph
                .person(&hop.person_b)
                .expect("chain references a person id missing from the index");
            let movie = graph
                .movie(&hop.movie)
                .expect("chain references a movie id missing from the index");

            ChainStep {
                source_id: source.id.clone(),
                source_name: source.name.clone(),
                movie_id: movie.id.clone(),
                movie_title: movie.title.clone(),
                movie_year: movie.year,
                target_id: target.id.clone(),
                target_name: target.name.clone(),
            }
        })
        .collect()
}
