//! lexirank CLI: rank sections or build a concept graph from a JSON request.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use lexirank::json::{GraphRequest, RankBatchRequest, RankRequest};
use lexirank::{LexiConfig, RandomVisuals};

#[derive(Parser)]
#[command(name = "lexirank", version, about = "Lexical relevance ranking and concept graphs")]
struct Cli {
    /// JSON config file; used when a request carries no "config" of its own.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON response.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank sections against a query.
    Rank {
        /// Request file (reads stdin when omitted).
        input: Option<PathBuf>,
    },

    /// Rank one section set against several queries.
    Batch {
        /// Request file (reads stdin when omitted).
        input: Option<PathBuf>,
    },

    /// Build a concept graph from documents.
    Graph {
        /// Request file (reads stdin when omitted).
        input: Option<PathBuf>,

        /// Seed for node colours and base edge weights.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn read_request(input: Option<&PathBuf>) -> Result<Value> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("parsing request JSON")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn has_inline_config(request: &Value) -> bool {
    request.get("config").is_some_and(|c| !c.is_null())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => Some(
            LexiConfig::from_path(path)
                .with_context(|| format!("loading config {}", path.display()))?,
        ),
        None => None,
    };

    match &cli.command {
        Commands::Rank { input } => {
            let value = read_request(input.as_ref())?;
            let mut request = RankRequest::from_value(&value)?;
            if let (Some(cfg), false) = (&file_config, has_inline_config(&value)) {
                request.config = cfg.rank.clone();
            }
            print_json(&request.run(), cli.pretty)?;
        }
        Commands::Batch { input } => {
            let value = read_request(input.as_ref())?;
            let mut request = RankBatchRequest::from_value(&value)?;
            if let (Some(cfg), false) = (&file_config, has_inline_config(&value)) {
                request.config = cfg.rank.clone();
            }
            print_json(&request.run(), cli.pretty)?;
        }
        Commands::Graph { input, seed } => {
            let value = read_request(input.as_ref())?;
            let mut request = GraphRequest::from_value(&value)?;
            if let (Some(cfg), false) = (&file_config, has_inline_config(&value)) {
                request.config = cfg.graph.clone();
            }
            let mut visuals = match seed {
                Some(seed) => RandomVisuals::seeded(*seed),
                None => RandomVisuals::new(),
            };
            print_json(&request.run_with(&mut visuals), cli.pretty)?;
        }
    }

    Ok(())
}
