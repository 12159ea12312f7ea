//! Decay and recovery constants.
//!
//! Values come from the builder or from the environment
//! (`DECAY_RATE_PER_HOUR`, `RECOVERY_INCREMENT`). Validation uses
//! Stillwater's `Validation` so every broken rule is reported in one pass.
//!
//! # Example
//!
//! ```rust
//! use arbor::config::DecayConfig;
//!
//! let config = DecayConfig::builder()
//!     .decay_rate_per_hour(1.5)
//!     .recovery_increment(5.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.decay_rate_per_hour, 1.5);
//! ```

use crate::core::MAX_VALUE;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod error;

pub use error::{ConfigError, ConfigViolation};

/// Environment variable holding the hourly decay rate.
pub const DECAY_RATE_VAR: &str = "DECAY_RATE_PER_HOUR";
/// Environment variable holding the per-event recovery increment.
pub const RECOVERY_INCREMENT_VAR: &str = "RECOVERY_INCREMENT";

pub const DEFAULT_DECAY_RATE_PER_HOUR: f64 = 2.0;
pub const DEFAULT_RECOVERY_INCREMENT: f64 = 10.0;

/// Constants driving the decay engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayConfig {
    /// Percentage points lost per elapsed hour.
    pub decay_rate_per_hour: f64,
    /// Percentage points gained per recovery event.
    pub recovery_increment: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            decay_rate_per_hour: DEFAULT_DECAY_RATE_PER_HOUR,
            recovery_increment: DEFAULT_RECOVERY_INCREMENT,
        }
    }
}

impl DecayConfig {
    pub fn builder() -> DecayConfigBuilder {
        DecayConfigBuilder::new()
    }

    /// Read the process environment. Unset or blank variables keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`DecayConfig::from_env`], with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(rate) = parse_var(&lookup, DECAY_RATE_VAR)? {
            builder = builder.decay_rate_per_hour(rate);
        }
        if let Some(increment) = parse_var(&lookup, RECOVERY_INCREMENT_VAR)? {
            builder = builder.recovery_increment(increment);
        }
        builder.build()
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let checks = vec![
            check_finite(DECAY_RATE_VAR, self.decay_rate_per_hour),
            check_non_negative(DECAY_RATE_VAR, self.decay_rate_per_hour),
            check_finite(RECOVERY_INCREMENT_VAR, self.recovery_increment),
            check_non_negative(RECOVERY_INCREMENT_VAR, self.recovery_increment),
            check_at_most(RECOVERY_INCREMENT_VAR, self.recovery_increment, MAX_VALUE),
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}

fn parse_var<F>(lookup: &F, key: &'static str) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
}

fn check_finite(key: &'static str, value: f64) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if value.is_finite() {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::NotFinite { key, value })
    }
}

fn check_non_negative(
    key: &'static str,
    value: f64,
) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if value < 0.0 {
        Validation::fail(ConfigViolation::Negative { key, value })
    } else {
        Validation::success(())
    }
}

fn check_at_most(
    key: &'static str,
    value: f64,
    max: f64,
) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if value > max {
        Validation::fail(ConfigViolation::TooLarge { key, value, max })
    } else {
        Validation::success(())
    }
}

/// Builder for `DecayConfig`
#[derive(Clone, Debug, Default)]
pub struct DecayConfigBuilder {
    config: DecayConfig,
}

impl DecayConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hourly decay rate
    pub fn decay_rate_per_hour(mut self, rate: f64) -> Self {
        self.config.decay_rate_per_hour = rate;
        self
    }

    /// Set the per-event recovery increment
    pub fn recovery_increment(mut self, increment: f64) -> Self {
        self.config.recovery_increment = increment;
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<DecayConfig, ConfigError> {
        match self.config.validate() {
            Validation::Success(_) => Ok(self.config),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }
}
