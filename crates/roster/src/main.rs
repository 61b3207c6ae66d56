use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use roster_models::config::{LogFormat, LoggingConfig, RosterConfig};
use roster_models::request::{DeleteRequest, LookupRequest, TradeRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Roster trade evaluation and team record store")]
struct Cli {
    /// Path to configuration file. Defaults apply when it does not exist.
    #[arg(short, long, global = true, default_value = "config/roster.toml")]
    config: String,

    /// Pretty-print the output JSON
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a team: {sessionId, team, mode} -> {players, picks, score}
    Lookup(InputArgs),
    /// Apply a two-team trade: {sessionId, tradeTeams, newRosters, picks} -> scores
    Trade(InputArgs),
    /// Delete a session's team records: {sessionId, teams}
    Delete(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Read the request JSON from a file instead of stdin
    #[arg(short, long)]
    input: Option<String>,
}

fn init_tracing(config: &LoggingConfig) {
    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    match config.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn load_config(path: &str) -> Result<RosterConfig> {
    if !Path::new(path).exists() {
        return Ok(RosterConfig::default());
    }
    let config_str =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config: {path}"))?;
    toml::from_str(&config_str).with_context(|| "Failed to parse config")
}

fn read_request<T: DeserializeOwned>(args: &InputArgs) -> Result<T> {
    let json = if let Some(input_path) = &args.input {
        std::fs::read_to_string(input_path)
            .with_context(|| format!("Failed to read input: {input_path}"))?
    } else {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    };
    serde_json::from_str(&json).context("Failed to parse request JSON")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_tracing(&config.logging);

    let engine = roster::build_engine(&config).context("Failed to build engine")?;

    match &cli.command {
        Command::Lookup(args) => {
            let request: LookupRequest = read_request(args)?;
            let snapshot = engine
                .lookup(&request)
                .await
                .map_err(|e| anyhow::anyhow!("Lookup failed: {e}"))?;
            print_json(&snapshot, cli.pretty)?;
        }
        Command::Trade(args) => {
            let request: TradeRequest = read_request(args)?;
            let outcome = engine
                .trade(&request)
                .await
                .map_err(|e| anyhow::anyhow!("Trade failed: {e}"))?;
            let response = outcome.to_response();
            // Scores are printed even when a write failed
            print_json(&response, cli.pretty)?;
            if !response.failures.is_empty() {
                anyhow::bail!(
                    "{} of {} trade writes failed",
                    response.failures.len(),
                    outcome.teams.len()
                );
            }
        }
        Command::Delete(args) => {
            let request: DeleteRequest = read_request(args)?;
            engine
                .delete(&request)
                .await
                .map_err(|e| anyhow::anyhow!("Delete failed: {e}"))?;
        }
    }

    Ok(())
}
