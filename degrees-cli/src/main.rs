//! degrees CLI - shortest connections between people through shared movies
//!
//! Loads the people/movies/stars tables once per invocation, builds an
//! in-memory bipartite graph index, and answers "six degrees of
//! separation" queries over it.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::DataOpts;
use config::DegreesConfig;
use output::OutputFormat;

/// Six-degrees-of-separation queries over people and movies.
///
/// Finds the shortest chain of shared-movie links between two people,
/// loading the three input tables from CSV, JSON, or Parquet.
#[derive(Parser)]
#[command(name = "degrees")]
#[command(author, version)]
#[command(about = "Shortest connections between people through shared movies")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  degrees find \"Kevin Bacon\" \"Tom Hanks\" --data-dir data
  degrees resolve \"Jane Doe\" --data-dir data
  degrees stats --data-dir data
  degrees find a b --from-id nm0000102 --to-id nm0000158")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest connection between two people
    #[command(visible_alias = "f")]
    Find {
        /// First person's name
        source: String,

        /// Second person's name
        target: String,

        /// Person id to use for the first endpoint (skips name lookup)
        #[arg(long, value_name = "ID")]
        from_id: Option<String>,

        /// Person id to use for the second endpoint (skips name lookup)
        #[arg(long, value_name = "ID")]
        to_id: Option<String>,

        #[command(flatten)]
        data: DataOpts,
    },

    /// List the person ids matching a name
    Resolve {
        /// Name to look up (exact, case-insensitive)
        name: String,

        #[command(flatten)]
        data: DataOpts,
    },

    /// Show index sizes and data quality counters
    Stats {
        #[command(flatten)]
        data: DataOpts,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .degreesrc.toml
    let config = DegreesConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    // Apply color override from config if set
    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    match cli.command {
        Commands::Find {
            source,
            target,
            from_id,
            to_id,
            data,
        } => commands::find::run(
            &data,
            &config,
            &source,
            &target,
            from_id.as_deref(),
            to_id.as_deref(),
            format,
        ),
        Commands::Resolve { name, data } => commands::resolve::run(&data, &config, &name, format),
        Commands::Stats { data } => commands::stats::run(&data, &config, format),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}
