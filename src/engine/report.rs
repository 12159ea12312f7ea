//! Presentation snapshot returned to transports.

use crate::core::{classify, Tier};
use serde::Serialize;
use std::fmt;

/// Tier plus value rounded to one decimal.
///
/// The tier is classified from the unrounded value.
///
/// # Example
///
/// ```rust
/// use arbor::engine::Report;
/// use arbor::core::Tier;
///
/// let report = Report::new(89.96);
/// assert_eq!(report.tier, Tier::Thriving);
/// assert_eq!(report.value, 90.0);
/// assert_eq!(report.to_string(), "🌳 thriving 90.0%");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Report {
    pub tier: Tier,
    pub value: f64,
}

impl Report {
    pub fn new(value: f64) -> Self {
        Self {
            tier: classify(value),
            value: round_tenths(value),
        }
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:.1}%", self.tier.glyph(), self.tier, self.value)
    }
}
