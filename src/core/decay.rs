//! Pure decay and recovery arithmetic.
//!
//! ```text
//! elapsedHours = max(0, now - lastUpdated) in hours
//! loss         = elapsedHours × ratePerHour
//! value        = clamp(value - loss, 0, 100)
//! lastUpdated  = max(now, lastUpdated)
//! ```
//!
//! Nothing here touches storage or reads the clock; callers pass `now` in.

use super::state::{clamp_value, ResourceState};
use chrono::{DateTime, Utc};

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Outcome of reconciling a state with the clock, with the intermediate
/// terms kept for logging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settlement {
    /// Hours charged for decay. Never negative.
    pub elapsed_hours: f64,
    /// Percentage points removed before clamping.
    pub loss: f64,
    /// True when `now` was earlier than the stored timestamp.
    pub clock_skewed: bool,
    /// The settled state.
    pub state: ResourceState,
}

/// Signed hours from `from` to `to`.
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to.signed_duration_since(from);
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / MICROS_PER_HOUR,
        None => delta.num_milliseconds() as f64 / MILLIS_PER_HOUR,
    }
}

/// Apply decay accrued between `state.last_updated` and `now`.
///
/// A clock that reads earlier than the stored timestamp charges zero hours
/// and keeps the stored timestamp, so the interval is neither healed nor
/// charged twice once the clock catches up.
///
/// # Example
///
/// ```rust
/// use arbor::core::{decay, ResourceState};
/// use chrono::{Duration, Utc};
///
/// let then = Utc::now();
/// let state = ResourceState::fresh(then);
/// let settled = decay::settle(&state, then + Duration::hours(5), 2.0);
/// assert_eq!(settled.state.value, 90.0);
/// ```
pub fn settle(state: &ResourceState, now: DateTime<Utc>, rate_per_hour: f64) -> Settlement {
    let raw_hours = hours_between(state.last_updated, now);
    let clock_skewed = raw_hours < 0.0;
    let elapsed_hours = raw_hours.max(0.0);
    let loss = elapsed_hours * rate_per_hour;

    Settlement {
        elapsed_hours,
        loss,
        clock_skewed,
        state: ResourceState {
            value: clamp_value(state.value - loss),
            last_updated: now.max(state.last_updated),
        },
    }
}

/// Apply one recovery event. Instantaneous: the timestamp is untouched.
pub fn recover(state: &ResourceState, increment: f64) -> ResourceState {
    ResourceState {
        value: clamp_value(state.value + increment),
        last_updated: state.last_updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn five_hours_at_two_percent_loses_ten() {
        let state = ResourceState::new(100.0, t0());
        let settled = settle(&state, t0() + Duration::hours(5), 2.0);

        assert_eq!(settled.elapsed_hours, 5.0);
        assert_eq!(settled.loss, 10.0);
        assert_eq!(settled.state.value, 90.0);
        assert_eq!(settled.state.last_updated, t0() + Duration::hours(5));
        assert!(!settled.clock_skewed);
    }

    #[test]
    fn decay_clamps_at_floor() {
        let state = ResourceState::new(3.0, t0());
        let settled = settle(&state, t0() + Duration::hours(10), 2.0);

        assert_eq!(settled.loss, 20.0);
        assert_eq!(settled.state.value, 0.0);
    }

    #[test]
    fn zero_elapsed_time_changes_nothing() {
        let state = ResourceState::new(55.5, t0());
        let settled = settle(&state, t0(), 2.0);

        assert_eq!(settled.loss, 0.0);
        assert_eq!(settled.state, state);
    }

    #[test]
    fn fractional_hours_decay_proportionally() {
        let state = ResourceState::new(50.0, t0());
        let settled = settle(&state, t0() + Duration::minutes(90), 2.0);
        assert!((settled.state.value - 47.0).abs() < 1e-9);
    }

    #[test]
    fn clock_rollback_neither_heals_nor_rewinds() {
        let state = ResourceState::new(40.0, t0());
        let settled = settle(&state, t0() - Duration::hours(3), 2.0);

        assert!(settled.clock_skewed);
        assert_eq!(settled.elapsed_hours, 0.0);
        assert_eq!(settled.state.value, 40.0);
        assert_eq!(settled.state.last_updated, t0());
    }

    #[test]
    fn zero_rate_never_decays() {
        let state = ResourceState::new(70.0, t0());
        let settled = settle(&state, t0() + Duration::days(30), 0.0);
        assert_eq!(settled.state.value, 70.0);
    }

    #[test]
    fn recovery_clamps_at_ceiling() {
        let state = ResourceState::new(95.0, t0());
        let recovered = recover(&state, 10.0);

        assert_eq!(recovered.value, 100.0);
        assert_eq!(recovered.last_updated, t0());
    }

    #[test]
    fn recovery_adds_increment() {
        let state = ResourceState::new(90.0, t0());
        assert_eq!(recover(&state, 10.0).value, 100.0);

        let state = ResourceState::new(33.0, t0());
        assert_eq!(recover(&state, 10.0).value, 43.0);
    }

    #[test]
    fn hours_between_is_signed() {
        assert_eq!(hours_between(t0(), t0() + Duration::hours(2)), 2.0);
        assert_eq!(hours_between(t0() + Duration::hours(2), t0()), -2.0);
    }
}
