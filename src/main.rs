//! Arbor CLI - local front end for the health gauge
//!
//! # Usage
//!
//! ```bash
//! # Show current health
//! arbor status
//!
//! # Record a recovery event
//! arbor recover
//!
//! # Read slash commands from stdin, one per line
//! arbor shell
//! ```

use anyhow::{Context, Result};
use arbor::command::{self, Command};
use arbor::config::DecayConfig;
use arbor::engine::DecayEngine;
use arbor::store::JsonFileStore;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Arbor - a health gauge that decays over time and recovers on demand
#[derive(Parser)]
#[command(name = "arbor", version, about)]
struct Cli {
    /// Path of the persisted state file
    #[arg(long, env = "ARBOR_STATE_FILE", default_value = "arbor_state.json", global = true)]
    state_file: PathBuf,

    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current health
    Status,
    /// Record one recovery event
    Recover,
    /// Print the welcome text
    Start,
    /// Answer slash commands read from stdin
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = DecayConfig::from_env().context("failed to load decay configuration")?;
    tracing::debug!(
        decay_rate_per_hour = config.decay_rate_per_hour,
        recovery_increment = config.recovery_increment,
        state_file = %cli.state_file.display(),
        "configuration loaded"
    );

    let engine = DecayEngine::new(JsonFileStore::new(&cli.state_file), config);

    match cli.command {
        Commands::Status if cli.json => print_json(&engine.status()?),
        Commands::Recover if cli.json => print_json(&engine.recovery()?),
        Commands::Status => print_reply(&engine, Command::Status),
        Commands::Recover => print_reply(&engine, Command::Recover),
        Commands::Start => print_reply(&engine, Command::Start),
        Commands::Shell => run_shell(&engine),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();
}

fn print_json(report: &arbor::Report) -> Result<()> {
    let json = serde_json::to_string(report).context("failed to encode report")?;
    println!("{json}");
    Ok(())
}

fn print_reply(engine: &DecayEngine<JsonFileStore>, command: Command) -> Result<()> {
    let reply = command::respond(engine, command)
        .with_context(|| format!("{} command failed", command.name()))?;
    println!("{reply}");
    Ok(())
}

fn run_shell(engine: &DecayEngine<JsonFileStore>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match Command::parse(&line) {
            Ok(command) => match command::respond(engine, command) {
                Ok(reply) => reply,
                Err(error) => {
                    tracing::error!(%error, command = command.name(), "command failed");
                    format!("Something went wrong: {error}")
                }
            },
            Err(error) => {
                tracing::debug!(%error, "ignoring input");
                format!("{error}. Try /status or /recover.")
            }
        };

        writeln!(stdout, "{reply}\n").context("failed to write reply")?;
        stdout.flush().context("failed to flush stdout")?;
    }

    Ok(())
}
