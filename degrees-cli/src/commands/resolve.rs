//! Resolve command - list candidate ids for a name
//!
//! Exact case-insensitive lookup against the name index. An empty
//! candidate list is an ordinary "not found" result, not an error;
//! multiple candidates mean the name needs disambiguation by id.

use anyhow::Result;
use colored::Colorize;
use degrees_core::DegreesGraph;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use super::{load_graph, DataOpts};
use crate::config::DegreesConfig;
use crate::output::{Output, OutputFormat, TableDisplay};

/// One person matching the queried name.
#[derive(Debug, Serialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub birth: Option<u32>,
}

/// Result of a name resolution query.
#[derive(Debug, Serialize)]
pub struct ResolveResult {
    pub query: String,
    pub count: usize,
    pub candidates: Vec<Candidate>,
}

impl TableDisplay for ResolveResult {
    fn to_table(&self) -> String {
        if self.candidates.is_empty() {
            return format!(
                "{} No person named \"{}\" in the database.",
                "Not found.".yellow().bold(),
                self.query
            );
        }

        let mut builder = Builder::default();
        builder.push_record(["id", "name", "birth"]);
        for candidate in &self.candidates {
            builder.push_record([
                candidate.id.clone(),
                candidate.name.clone(),
                candidate
                    .birth
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::rounded());

        format!(
            "{} {} match{} for \"{}\"\n{}",
            "Resolved.".green().bold(),
            self.count,
            if self.count == 1 { "" } else { "es" },
            self.query,
            table
        )
    }
}

fn resolve(graph: &DegreesGraph, name: &str) -> ResolveResult {
    let candidates: Vec<Candidate> = graph
        .resolve_name(name)
        .iter()
        .filter_map(|id| graph.person(id))
        .map(|person| Candidate {
            id: person.id.clone(),
            name: person.name.clone(),
            birth: person.birth,
        })
        .collect();

    ResolveResult {
        query: name.to_string(),
        count: candidates.len(),
        candidates,
    }
}

pub fn run(data: &DataOpts, config: &DegreesConfig, name: &str, format: OutputFormat) -> Result<()> {
    let graph = load_graph(data, config)?;
    Output::new(resolve(&graph, name), format).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use degrees_core::{Appearance, Dataset, Movie, Person};

    fn sample_graph() -> DegreesGraph {
        DegreesGraph::build(Dataset {
            people: vec![
                Person::new("j1", "Jane Doe", Some(1970)),
                Person::new("j2", "Jane Doe", None),
            ],
            movies: vec![Movie::new("m1", "Apollo 13", Some(1995))],
            appearances: vec![Appearance::new("j1", "m1")],
            skipped_rows: 0,
        })
    }

    #[test]
    fn test_resolve_ambiguous() {
        let graph = sample_graph();
        let result = resolve(&graph, "JANE DOE");
        assert_eq!(result.count, 2);
        assert_eq!(result.candidates[0].id, "j1");
        assert_eq!(result.candidates[1].birth, None);
    }

    #[test]
    fn test_resolve_not_found_is_empty() {
        let graph = sample_graph();
        let result = resolve(&graph, "nobody");
        assert_eq!(result.count, 0);

        colored::control::set_override(false);
        assert!(result.to_table().contains("No person named"));
    }
}
