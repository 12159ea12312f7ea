//! Configuration errors.

use thiserror::Error;

/// A single rule broken by a configuration value
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("{key} must be a finite number (got {value})")]
    NotFinite { key: &'static str, value: f64 },

    #[error("{key} must not be negative (got {value})")]
    Negative { key: &'static str, value: f64 },

    #[error("{key} must not exceed {max} (got {value})")]
    TooLarge {
        key: &'static str,
        value: f64,
        max: f64,
    },
}

/// Errors that can occur while assembling a `DecayConfig`
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// An environment variable held something other than a number
    #[error("{key} is not a number: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// One or more values broke a rule. All violations are listed.
    #[error("invalid configuration: {}", join(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
