//! Find command - shortest connection between two people
//!
//! Resolves both names against the index, runs the breadth-first
//! search, and prints the chain of shared-movie links. Ambiguous names
//! are surfaced as a candidate listing rather than silently picking one;
//! re-run with `--from-id`/`--to-id` to disambiguate.

use anyhow::{bail, Result};
use colored::Colorize;
use degrees_core::{describe_chain, ChainStep, DegreesGraph, Person};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use super::{load_graph, DataOpts};
use crate::config::DegreesConfig;
use crate::output::{Output, OutputFormat, TableDisplay};

/// A resolved endpoint of the query.
#[derive(Debug, Clone, Serialize)]
pub struct PersonRef {
    pub id: String,
    pub name: String,
    pub birth: Option<u32>,
}

impl From<&Person> for PersonRef {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            name: person.name.clone(),
            birth: person.birth,
        }
    }
}

/// Result of a connection query.
#[derive(Debug, Serialize)]
pub struct FindResult {
    pub source: PersonRef,
    pub target: PersonRef,
    pub connected: bool,
    /// Chain length; `None` when no connection exists.
    pub degrees: Option<usize>,
    pub steps: Vec<ChainStep>,
}

impl TableDisplay for FindResult {
    fn to_table(&self) -> String {
        let mut output = String::new();

        if !self.connected {
            output.push_str(&format!(
                "{} {} and {} share no movies, directly or transitively.",
                "No connection found.".yellow().bold(),
                self.source.name.cyan(),
                self.target.name.cyan()
            ));
            return output;
        }

        let degrees = self.degrees.unwrap_or(0);
        let plural = if degrees == 1 { "degree" } else { "degrees" };
        output.push_str(&format!(
            "{} {} {} of separation.\n",
            "Found!".green().bold(),
            degrees,
            plural
        ));

        for (index, step) in self.steps.iter().enumerate() {
            output.push_str(&format!("  {}: {}\n", index + 1, step));
        }
        output.trim_end().to_string()
    }
}

/// Render ambiguity candidates as a small table for the error message.
fn candidates_table(graph: &DegreesGraph, ids: &[String]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["id", "name", "birth"]);
    for id in ids {
        if let Some(person) = graph.person(id) {
            builder.push_record([
                person.id.clone(),
                person.name.clone(),
                person
                    .birth
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Resolve one endpoint: an explicit id flag wins, otherwise the name
/// must match exactly one person.
fn resolve_endpoint<'a>(
    graph: &'a DegreesGraph,
    name: &str,
    id_flag: Option<&str>,
    flag: &str,
) -> Result<&'a Person> {
    if let Some(id) = id_flag {
        return graph
            .person(id)
            .ok_or_else(|| anyhow::anyhow!("No person with id '{}' in the database", id));
    }

    let ids = graph.resolve_name(name);
    match ids.len() {
        0 => bail!("Person \"{}\" not found in database", name),
        1 => Ok(graph
            .person(&ids[0])
            .expect("resolved id missing from index")),
        _ => bail!(
            "Name \"{}\" is ambiguous ({} people share it):\n{}\nRe-run with {} <id> to pick one.",
            name,
            ids.len(),
            candidates_table(graph, ids),
            flag
        ),
    }
}

/// Resolve both endpoints and run the connection query.
fn execute(
    graph: &DegreesGraph,
    source: &str,
    target: &str,
    from_id: Option<&str>,
    to_id: Option<&str>,
) -> Result<FindResult> {
    let source = resolve_endpoint(graph, source, from_id, "--from-id")?;
    let target = resolve_endpoint(graph, target, to_id, "--to-id")?;

    let chain = graph.find_connection(&source.id, &target.id)?;
    Ok(FindResult {
        source: source.into(),
        target: target.into(),
        connected: chain.is_some(),
        degrees: chain.as_ref().map(|c| c.len()),
        steps: chain
            .as_deref()
            .map(|hops| describe_chain(graph, hops))
            .unwrap_or_default(),
    })
}

pub fn run(
    data: &DataOpts,
    config: &DegreesConfig,
    source: &str,
    target: &str,
    from_id: Option<&str>,
    to_id: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let graph = load_graph(data, config)?;
    let result = execute(&graph, source, target, from_id, to_id)?;
    let connected = result.connected;

    Output::new(result, format).render()?;

    // No connection is a not-found condition, same exit code as an
    // unknown name.
    if !connected {
        std::process::exit(1);
    }
    Ok(())
}
