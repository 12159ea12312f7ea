//! The persisted resource record.
//!
//! A `ResourceState` is the last known health value together with the
//! instant it was observed. Every other quantity (current health, tier) is
//! derived from it lazily, so this is the only thing that ever hits disk.

use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound of the health scale.
pub const MAX_VALUE: f64 = 100.0;

/// Lower bound of the health scale.
pub const MIN_VALUE: f64 = 0.0;

/// Clamp an arbitrary float into `[MIN_VALUE, MAX_VALUE]`.
///
/// NaN has no meaningful position on the scale and maps to the floor.
pub fn clamp_value(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_VALUE;
    }
    value.clamp(MIN_VALUE, MAX_VALUE)
}

/// Last recorded health value and the instant it was recorded.
///
/// Serialized as `{"value": <float>, "lastUpdated": "<ISO-8601 instant>"}`.
///
/// # Example
///
/// ```rust
/// use arbor::core::ResourceState;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let state = ResourceState::fresh(now);
/// assert_eq!(state.value, 100.0);
/// assert_eq!(state.last_updated, now);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceState {
    /// Health percentage, always within `[0, 100]` once constructed
    /// through this crate.
    pub value: f64,

    /// When `value` was last reconciled with the clock.
    #[serde(with = "timestamp")]
    pub last_updated: DateTime<Utc>,
}

impl ResourceState {
    /// Create a state, clamping `value` into range.
    pub fn new(value: f64, last_updated: DateTime<Utc>) -> Self {
        Self {
            value: clamp_value(value),
            last_updated,
        }
    }

    /// Full health observed at `now`. Used when no prior record exists.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            value: MAX_VALUE,
            last_updated: now,
        }
    }

    /// Check the record is usable as loaded from storage.
    ///
    /// Non-finite values cannot be reasoned about and count as corruption;
    /// finite values outside the scale are repaired by clamping.
    pub fn sanitized(self) -> Option<Self> {
        if !self.value.is_finite() {
            return None;
        }
        Some(Self::new(self.value, self.last_updated))
    }
}
