//! Stats command - index size and data quality counters

use anyhow::Result;
use colored::Colorize;
use degrees_core::DegreesGraph;
use serde::Serialize;

use super::{load_graph, DataOpts};
use crate::config::DegreesConfig;
use crate::output::{Output, OutputFormat, TableDisplay};

/// Statistics about the loaded graph index.
#[derive(Debug, Serialize)]
pub struct StatsResult {
    pub people: usize,
    pub movies: usize,
    /// Admitted appearance edges (duplicates collapsed).
    pub appearances: usize,
    /// Appearance rows dropped for referencing an unknown id.
    pub dropped_appearances: usize,
    /// Malformed rows skipped during ingestion.
    pub skipped_rows: usize,
}

impl TableDisplay for StatsResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{}", "Degrees index".cyan().bold()));
        lines.push(format!("  {}: {}", "People".cyan(), self.people));
        lines.push(format!("  {}: {}", "Movies".cyan(), self.movies));
        lines.push(format!("  {}: {}", "Appearances".cyan(), self.appearances));
        if self.dropped_appearances > 0 {
            lines.push(format!(
                "  {}: {}",
                "Dropped (dangling)".yellow(),
                self.dropped_appearances
            ));
        }
        if self.skipped_rows > 0 {
            lines.push(format!(
                "  {}: {}",
                "Skipped rows".yellow(),
                self.skipped_rows
            ));
        }
        lines.join("\n")
    }
}

impl From<&DegreesGraph> for StatsResult {
    fn from(graph: &DegreesGraph) -> Self {
        Self {
            people: graph.person_count(),
            movies: graph.movie_count(),
            appearances: graph.appearance_count(),
            dropped_appearances: graph.dropped_appearances(),
            skipped_rows: graph.skipped_rows(),
        }
    }
}

pub fn run(data: &DataOpts, config: &DegreesConfig, format: OutputFormat) -> Result<()> {
    let graph = load_graph(data, config)?;
    Output::new(StatsResult::from(&graph), format).render()
}
