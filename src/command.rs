//! Slash commands and the replies a chat transport would send.
//!
//! The transport itself (polling, credentials, message delivery) lives
//! outside this crate; it hands raw text to [`Command::parse`] and sends back
//! whatever [`respond`] returns.

use crate::core::Clock;
use crate::engine::{DecayEngine, EngineError, Report};
use crate::store::StateStore;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while parsing a command
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),
}

/// Commands understood by the gauge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Greeting and usage help
    Start,
    /// Show current health
    Status,
    /// Record one recovery event
    Recover,
}

impl Command {
    /// Parse the first word of `input`.
    ///
    /// Accepts an optional leading `/` and an optional `@botname` suffix;
    /// matching is case-insensitive. Trailing arguments are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arbor::command::Command;
    ///
    /// assert_eq!(Command::parse("/status").unwrap(), Command::Status);
    /// assert_eq!(Command::parse("/Paid@garden_bot").unwrap(), Command::Recover);
    /// assert!(Command::parse("/water").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let word = input.split_whitespace().next().ok_or(CommandError::Empty)?;
        let word = word.strip_prefix('/').unwrap_or(word);
        let name = word.split('@').next().unwrap_or(word).to_ascii_lowercase();

        match name.as_str() {
            "start" | "help" => Ok(Self::Start),
            "status" => Ok(Self::Status),
            "recover" | "paid" => Ok(Self::Recover),
            _ => Err(CommandError::Unknown(input.trim().to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Status => "status",
            Self::Recover => "recover",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

pub const WELCOME: &str = "🌳 Gardener activated! Send /recover (or /paid) when you keep an \
agreement and /status to check on the tree.";

/// Run `command` against `engine` and render the reply text.
pub fn respond<S, C>(engine: &DecayEngine<S, C>, command: Command) -> Result<String, EngineError>
where
    S: StateStore,
    C: Clock,
{
    tracing::debug!(command = command.name(), "handling command");
    match command {
        Command::Start => Ok(WELCOME.to_string()),
        Command::Status => engine.status().map(|report| render_status(&report)),
        Command::Recover => engine.recovery().map(|report| render_recovery(&report)),
    }
}

/// Status card for a report.
pub fn render_status(report: &Report) -> String {
    format!(
        "Focus tree status:\n\n{} ({})\nHealth: {:.1}%",
        report.tier.glyph(),
        report.tier.caption(),
        report.value
    )
}

/// Celebration plus status card after a recovery.
pub fn render_recovery(report: &Report) -> String {
    format!(
        "🎉 Nice! You nourished the tree!\n\nCurrent status: {} ({})\nHealth: {:.1}%",
        report.tier.glyph(),
        report.tier.caption(),
        report.value
    )
}
