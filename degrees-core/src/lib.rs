//! Degrees Core - graph index and connection engine.
//!
//! This crate implements the "six degrees of separation" lookup over
//! three normalized tables: people, movies, and a person-to-movie
//! appearance relation. Records are ingested from CSV, JSON, or Parquet
//! sources (the format is interchangeable), indexed into a bipartite
//! graph with a case-insensitive name index, and queried with
//! breadth-first search for the shortest chain of shared-movie links
//! between two people.
//!
//! # Usage
//!
//! ```no_run
//! use degrees_core::{describe_chain, ingest, DegreesGraph};
//! use std::path::Path;
//!
//! # fn main() -> degrees_core::Result<()> {
//! let dataset = ingest::load_dataset(
//!     Path::new("data/people.csv"),
//!     Path::new("data/movies.csv"),
//!     Path::new("data/stars.csv"),
//!     None,
//! )?;
//! let graph = DegreesGraph::build(dataset);
//!
//! let source = graph.resolve_name("Kevin Bacon");
//! let target = graph.resolve_name("Tom Hanks");
//! if let (Some(s), Some(t)) = (source.first(), target.first()) {
//!     if let Some(chain) = graph.find_connection(s, t)? {
//!         for step in describe_chain(&graph, &chain) {
//!             println!("{step}");
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The graph is built once per session and is read-only afterwards, so
//! it can be queried repeatedly (and concurrently) without locking.

pub mod chain;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod types;

pub use chain::{describe_chain, ChainStep};
pub use error::{DegreesError, Result};
pub use graph::DegreesGraph;
pub use types::{Appearance, Dataset, Hop, Movie, Person};
