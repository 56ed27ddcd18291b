#![allow(clippy::doc_markdown)]
//! `vitrine` - query product recommendations from the command line.

mod output;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_core::{coerce_top_n, Recommender, RecommenderConfig};

use crate::output::Printer;

/// Vitrine - content-based product recommendations
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (optional, environment overrides it)
    #[arg(short, long, default_value = "vitrine.toml", env = "VITRINE_CONFIG")]
    config: PathBuf,

    /// Dataset CSV file. Skips the data directory search when given.
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend products similar to a named product
    Recommend {
        /// Product name, matched case-insensitively
        name: String,

        /// Number of results; invalid values fall back to the configured default
        #[arg(short = 'n', long)]
        top_n: Option<String>,
    },

    /// Suggest product names for a partial query
    Search {
        /// Partial or misspelled product name
        query: String,

        /// Maximum number of names
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show catalog and vocabulary statistics
    Info,

    /// Print the effective configuration as TOML
    Config,
}

/// Output format for command results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "vitrine=debug" } else { "vitrine=info" };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default.into());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build(config: &RecommenderConfig, data: Option<&PathBuf>) -> anyhow::Result<Recommender> {
    let started = Instant::now();
    let recommender = match data {
        Some(path) => Recommender::from_path(path, config.clone())
            .with_context(|| format!("Failed to load dataset {}", path.display()))?,
        None => Recommender::open(config).context("Recommendations are unavailable")?,
    };
    tracing::debug!(elapsed_ms = started.elapsed().as_millis(), "Recommender ready");
    Ok(recommender)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = RecommenderConfig::load_from(&args.config)
        .with_context(|| format!("Invalid configuration ({})", args.config.display()))?;
    let printer = Printer::new(args.format);

    match args.command {
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Info => {
            let recommender = build(&config, args.data.as_ref())?;
            printer.stats(&recommender.stats())?;
        }
        Command::Recommend { name, top_n } => {
            let top_n = top_n.map_or(config.default_top_n, |raw| {
                coerce_top_n(&raw, config.default_top_n)
            });
            let recommender = build(&config, args.data.as_ref())?;
            let result = recommender.recommend(&name, top_n);
            printer.recommendations(&result)?;
        }
        Command::Search { query, limit } => {
            let limit = limit.unwrap_or(config.default_search_limit);
            let recommender = build(&config, args.data.as_ref())?;
            let names = recommender.search(&query, limit);
            printer.names(&query, &names)?;
        }
    }
    Ok(())
}
