//! Wayfinder CLI
//!
//! Terminal front end for the map screen: one-shot place lookups and an
//! interactive session driving the full screen state machine.

#![allow(clippy::print_stdout)]

mod input;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{AppShell, GeocodingPort, ShellCommand, ShellRuntime, ShellSnapshot};
use clap::{Parser, Subcommand};
use domain::SearchQuery;
use infrastructure::{
    AppConfig, GeocodingAdapter, LoggingConfig, StaticLocationAdapter, init_logging,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::input::{HELP, InputAction, parse_line};
use crate::terminal::{TerminalMapControl, TerminalNotifier, render_snapshot};

/// Wayfinder CLI
#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(author, version, about = "Map place search from the terminal", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./wayfinder.toml if present)
    #[arg(short, long, env = "WAYFINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List place suggestions for a partial name
    ///
    /// Example: wayfinder suggest "Davao"
    Suggest {
        /// Place name, possibly incomplete
        query: String,
    },

    /// Resolve a place name to its best coordinate
    ///
    /// Example: wayfinder resolve "Davao City"
    Resolve {
        /// Place name
        query: String,
    },

    /// Run the map screen interactively (type 'help' once started)
    Interactive,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Logging settings with the command-line verbosity applied
fn effective_logging(config: &LoggingConfig, verbose: u8) -> LoggingConfig {
    if verbose == 0 {
        config.clone()
    } else {
        config.clone().with_filter(log_filter_from_verbosity(verbose))
    }
}

fn parse_query(text: &str) -> anyhow::Result<SearchQuery> {
    SearchQuery::parse(text).context("Query must not be empty")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };
    config.validate().map_err(anyhow::Error::msg)?;

    init_logging(&effective_logging(&config.logging, cli.verbose))?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Suggest { query } => {
            let query = parse_query(&query)?;
            let geocoder = GeocodingAdapter::from_config(&config.geocoding)?;
            let suggestions = geocoder.suggest(&query).await;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else if suggestions.is_empty() {
                println!("No suggestions for \"{query}\"");
            } else {
                for (i, suggestion) in suggestions.iter().enumerate() {
                    println!("{}. {} ({})", i + 1, suggestion.label, suggestion.coordinate);
                }
            }
        },

        Commands::Resolve { query } => {
            let query = parse_query(&query)?;
            let geocoder = GeocodingAdapter::from_config(&config.geocoding)?;
            let coordinate = geocoder.resolve(&query).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&coordinate)?);
            } else {
                println!("📍 {query}: {coordinate}");
            }
        },

        Commands::Interactive => run_interactive(&config, cli.json).await?,
    }

    Ok(())
}

async fn run_interactive(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let geocoder = GeocodingAdapter::from_config(&config.geocoding)?;
    let location = StaticLocationAdapter::from_config(&config.device)?;
    let shell = AppShell::new(
        config.shell.clone(),
        Arc::new(geocoder),
        Arc::new(location),
        Arc::new(TerminalMapControl),
        Arc::new(TerminalNotifier),
    );

    let (runtime, mut snapshots) = ShellRuntime::new(shell);
    let (tx, commands) = mpsc::channel(32);

    println!("{HELP}\n");
    print_snapshot(&snapshots.borrow_and_update(), json)?;

    let printer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            if let Err(e) = print_snapshot(&snapshot, json) {
                tracing::error!(error = %e, "Failed to render snapshot");
            }
        }
    });
    let reader = tokio::spawn(read_commands(tx));

    runtime.run(commands).await;

    reader.abort();
    printer.await.context("Snapshot printer failed")?;
    Ok(())
}

fn print_snapshot(snapshot: &ShellSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else {
        println!("{}", render_snapshot(snapshot));
    }
    Ok(())
}

/// Forward stdin lines to the map screen until EOF or `quit`
async fn read_commands(tx: mpsc::Sender<ShellCommand>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(InputAction::Command(command)) => {
                let quit = command == ShellCommand::Quit;
                if tx.send(command).await.is_err() || quit {
                    break;
                }
            },
            Ok(InputAction::Help) => println!("{HELP}"),
            Ok(InputAction::Nothing) => {},
            Err(message) => println!("❓ {message}"),
        }
    }

    debug!("Input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_verbosity_zero() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
    }

    #[test]
    fn log_filter_verbosity_one() {
        assert_eq!(log_filter_from_verbosity(1), "info");
    }

    #[test]
    fn log_filter_verbosity_two() {
        assert_eq!(log_filter_from_verbosity(2), "debug");
    }

    #[test]
    fn log_filter_verbosity_three_or_more() {
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn verbosity_overrides_configured_filter() {
        let configured = LoggingConfig::default().with_filter("error");
        assert_eq!(effective_logging(&configured, 0).filter, "error");
        assert_eq!(effective_logging(&configured, 2).filter, "debug");
    }

    #[test]
    fn parse_query_rejects_blank() {
        assert!(parse_query("  ").is_err());
        assert_eq!(parse_query(" Davao ").unwrap().as_str(), "Davao");
    }

    #[test]
    fn cli_parses_suggest() {
        let cli = Cli::try_parse_from(["wayfinder", "-vv", "suggest", "Davao"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Suggest { query } if query == "Davao"));
    }

    #[test]
    fn cli_parses_resolve_with_json() {
        let cli = Cli::try_parse_from(["wayfinder", "--json", "resolve", "Davao City"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Resolve { query } if query == "Davao City"));
    }

    #[test]
    fn cli_parses_interactive_with_config() {
        let cli =
            Cli::try_parse_from(["wayfinder", "--config", "custom.toml", "interactive"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Interactive));
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["wayfinder"]).is_err());
    }
}
