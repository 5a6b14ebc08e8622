//! `calq`: normalize a calendar query from the command line.
//!
//! ```text
//! calq friday morning
//! calq --json '{"query": {"text": "today through friday"}}'
//! echo '{"query": "show trash"}' | calq
//! ```
//!
//! Prints the resolved query as JSON on stdout. Logs go to stderr.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use calendar_query::config::parse_utc_offset;
use calendar_query::{NormalizerConfig, NormalizerError, QueryNormalizer, RawQuery};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    name = "calq",
    version,
    about = "Normalize a calendar query into an explicit event window"
)]
struct Cli {
    /// Free-text query (e.g. `friday morning`). When neither this nor
    /// --json is given, a JSON payload is read from stdin.
    query: Vec<String>,

    /// Raw JSON payload (e.g. '{"query": {"text": "today"}}').
    #[arg(long, conflicts_with = "query")]
    json: Option<String>,

    /// Resolve against this RFC 3339 instant instead of the system clock.
    #[arg(long)]
    now: Option<String>,

    /// JSON config file (`default_user_id`, `utc_offset`).
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Fallback user id for deletions requests.
    #[arg(long)]
    user_id: Option<Uuid>,

    /// Fixed UTC offset, e.g. -08:00.
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<String>,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error).
    #[arg(short = 'l', long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = run(&cli)?;
    println!("{output}");
    Ok(())
}

fn run(cli: &Cli) -> Result<String> {
    let config = resolve_config(cli)?;
    let normalizer = QueryNormalizer::new(&config).context("failed to build normalizer")?;
    let raw = read_query(cli)?;

    let resolved = match &cli.now {
        Some(now) => normalizer.normalize_at(&raw, parse_now(now)?),
        None => normalizer.normalize(&raw),
    };
    tracing::info!(operation = ?resolved.operation(), "query normalized");

    let json = if cli.pretty {
        serde_json::to_string_pretty(&resolved)
    } else {
        serde_json::to_string(&resolved)
    };
    json.context("failed to serialize resolved query")
}

/// Config priority: flags > config file > defaults.
fn resolve_config(cli: &Cli) -> Result<NormalizerConfig> {
    let mut config = match &cli.config {
        Some(path) => NormalizerConfig::load(path)?,
        None => NormalizerConfig::default(),
    };
    if let Some(user_id) = cli.user_id {
        config.default_user_id = user_id;
    }
    if let Some(offset) = &cli.offset {
        parse_utc_offset(offset)?;
        config.utc_offset = offset.clone();
    }
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

fn read_query(cli: &Cli) -> Result<RawQuery> {
    if let Some(json) = &cli.json {
        return RawQuery::parse(json).context("failed to parse --json payload");
    }
    if !cli.query.is_empty() {
        return Ok(RawQuery::from_text(cli.query.join(" ")));
    }

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    if input.trim().is_empty() {
        bail!("no query given: pass query text, --json, or a JSON payload on stdin");
    }
    RawQuery::parse(&input).context("failed to parse stdin payload")
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, NormalizerError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| NormalizerError::InvalidDatetime(format!("'{}': {}", s, e)))
}
