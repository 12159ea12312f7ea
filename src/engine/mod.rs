//! The decay engine: the imperative shell around the pure core.
//!
//! Every operation runs one serialized cycle:
//!
//! 1. acquire the state lock
//! 2. sample the clock once
//! 3. load, settle and save
//! 4. (recovery only) add the increment and save again
//!
//! Holding the lock across the whole cycle means concurrent callers never
//! read the same pre-settle state, so no update is lost.

use crate::config::DecayConfig;
use crate::core::{decay, Clock, ResourceState, SystemClock};
use crate::store::StateStore;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

pub mod error;
mod report;

pub use error::EngineError;
pub use report::Report;

/// Owns the store and serializes every load–settle–save cycle.
///
/// # Example
///
/// ```rust
/// use arbor::config::DecayConfig;
/// use arbor::core::ManualClock;
/// use arbor::engine::DecayEngine;
/// use arbor::store::MemoryStore;
/// use chrono::{Duration, Utc};
///
/// let clock = ManualClock::new(Utc::now());
/// let engine = DecayEngine::with_clock(MemoryStore::new(), DecayConfig::default(), clock);
///
/// assert_eq!(engine.get_status().unwrap(), 100.0);
/// engine.clock().advance(Duration::hours(5));
/// assert_eq!(engine.get_status().unwrap(), 90.0);
/// assert_eq!(engine.record_recovery().unwrap(), 100.0);
/// ```
pub struct DecayEngine<S: StateStore, C: Clock = SystemClock> {
    store: Mutex<S>,
    clock: C,
    config: DecayConfig,
}

impl<S: StateStore> DecayEngine<S, SystemClock> {
    /// Engine on the wall clock.
    pub fn new(store: S, config: DecayConfig) -> Self {
        Self::with_clock(store, config, SystemClock)
    }
}

impl<S: StateStore, C: Clock> DecayEngine<S, C> {
    pub fn with_clock(store: S, config: DecayConfig, clock: C) -> Self {
        Self {
            store: Mutex::new(store),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Settle and return the current value.
    pub fn get_status(&self) -> Result<f64, EngineError> {
        self.snapshot().map(|state| state.value)
    }

    /// Settle, apply one recovery increment, and return the new value.
    ///
    /// Decay up to now is charged before the increment is added, and the
    /// recovery reuses the settle instant.
    pub fn record_recovery(&self) -> Result<f64, EngineError> {
        let mut store = self.lock()?;
        let now = self.clock.now();

        let settled = self.settle(&mut *store, now)?;
        let recovered = decay::recover(&settled, self.config.recovery_increment);
        store.save(&recovered)?;

        tracing::info!(
            before = settled.value,
            after = recovered.value,
            increment = self.config.recovery_increment,
            "recovery recorded"
        );
        Ok(recovered.value)
    }

    /// Settle and return the whole state.
    pub fn snapshot(&self) -> Result<ResourceState, EngineError> {
        let mut store = self.lock()?;
        let now = self.clock.now();
        self.settle(&mut *store, now)
    }

    /// [`get_status`](Self::get_status) shaped for presentation.
    pub fn status(&self) -> Result<Report, EngineError> {
        self.get_status().map(Report::new)
    }

    /// [`record_recovery`](Self::record_recovery) shaped for presentation.
    pub fn recovery(&self) -> Result<Report, EngineError> {
        self.record_recovery().map(Report::new)
    }

    /// Run `f` against the store while holding the state lock.
    pub fn with_store<R>(&self, f: impl FnOnce(&S) -> R) -> Result<R, EngineError> {
        let store = self.lock()?;
        Ok(f(&store))
    }

    fn settle(&self, store: &mut S, now: DateTime<Utc>) -> Result<ResourceState, EngineError> {
        let state = store.load(now);
        let settlement = decay::settle(&state, now, self.config.decay_rate_per_hour);

        if settlement.clock_skewed {
            tracing::warn!(
                stored = %state.last_updated,
                %now,
                "clock is behind stored state, skipping decay"
            );
        }
        tracing::debug!(
            elapsed_hours = settlement.elapsed_hours,
            loss = settlement.loss,
            value = settlement.state.value,
            "state settled"
        );

        store.save(&settlement.state)?;
        Ok(settlement.state)
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>, EngineError> {
        self.store.lock().map_err(|_| EngineError::LockPoisoned)
    }
}
