//! Presentation tiers derived from a health value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of [`Tier::Thriving`].
pub const THRIVING_FLOOR: f64 = 80.0;
/// Lower bound (inclusive) of [`Tier::Healthy`].
pub const HEALTHY_FLOOR: f64 = 50.0;
/// Lower bound (inclusive) of [`Tier::Declining`].
pub const DECLINING_FLOOR: f64 = 20.0;

/// Coarse label for a health value. Used only for presentation.
///
/// # Example
///
/// ```rust
/// use arbor::core::{classify, Tier};
///
/// assert_eq!(classify(80.0), Tier::Thriving);
/// assert_eq!(classify(79.9), Tier::Healthy);
/// assert_eq!(classify(19.9), Tier::Critical);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Critical,
    Declining,
    Healthy,
    Thriving,
}

/// Map a value to its tier. Each tier includes its lower bound.
pub fn classify(value: f64) -> Tier {
    if value >= THRIVING_FLOOR {
        Tier::Thriving
    } else if value >= HEALTHY_FLOOR {
        Tier::Healthy
    } else if value >= DECLINING_FLOOR {
        Tier::Declining
    } else {
        Tier::Critical
    }
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Thriving => "thriving",
            Self::Healthy => "healthy",
            Self::Declining => "declining",
            Self::Critical => "critical",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Thriving => "🌳",
            Self::Healthy => "🌿",
            Self::Declining => "🍂",
            Self::Critical => "🥀",
        }
    }

    /// Short phrase shown next to the glyph in replies.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Thriving => "Lush!",
            Self::Healthy => "Healthy",
            Self::Declining => "Losing leaves... careful!",
            Self::Critical => "Withered! Help the tree!",
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_include_lower_bound() {
        assert_eq!(classify(80.0), Tier::Thriving);
        assert_eq!(classify(79.9), Tier::Healthy);
        assert_eq!(classify(50.0), Tier::Healthy);
        assert_eq!(classify(49.99), Tier::Declining);
        assert_eq!(classify(20.0), Tier::Declining);
        assert_eq!(classify(19.9), Tier::Critical);
    }

    #[test]
    fn extremes_classify() {
        assert_eq!(classify(100.0), Tier::Thriving);
        assert_eq!(classify(0.0), Tier::Critical);
    }

    #[test]
    fn tiers_order_by_health() {
        assert!(Tier::Critical < Tier::Declining);
        assert!(Tier::Declining < Tier::Healthy);
        assert!(Tier::Healthy < Tier::Thriving);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Tier::Healthy.to_string(), "healthy");
        assert_eq!(Tier::Critical.to_string(), "critical");
    }

    #[test]
    fn only_critical_is_critical() {
        assert!(Tier::Critical.is_critical());
        assert!(!Tier::Declining.is_critical());
        assert!(!Tier::Thriving.is_critical());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Tier::Thriving).unwrap();
        assert_eq!(json, "\"thriving\"");
    }
}
