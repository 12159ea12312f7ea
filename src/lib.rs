//! Arbor: a time-decaying, recoverable health gauge
//!
//! Arbor tracks one resource whose health drains at a constant rate with
//! wall-clock time and is topped up by discrete recovery events. It follows a
//! "pure core, imperative shell" layout: the arithmetic is pure, and a thin
//! engine owns storage and the clock.
//!
//! # Core Concepts
//!
//! - **ResourceState**: the only persisted record, a value and a timestamp
//! - **Settle**: reconcile the record with the current instant and persist it
//! - **Recovery**: settle first, then add a fixed increment
//! - **Tier**: presentation label derived from the value
//!
//! # Example
//!
//! ```rust
//! use arbor::config::DecayConfig;
//! use arbor::core::{ManualClock, ResourceState, Tier};
//! use arbor::engine::DecayEngine;
//! use arbor::store::MemoryStore;
//! use chrono::{Duration, Utc};
//!
//! let start = Utc::now();
//! let store = MemoryStore::with_state(ResourceState::fresh(start));
//! let engine = DecayEngine::with_clock(
//!     store,
//!     DecayConfig::default(),
//!     ManualClock::new(start + Duration::hours(20)),
//! );
//!
//! let report = engine.status().unwrap();
//! assert_eq!(report.value, 60.0);
//! assert_eq!(report.tier, Tier::Healthy);
//! ```

pub mod command;
pub mod config;
pub mod core;
pub mod engine;
pub mod store;

// Re-export commonly used types
pub use config::DecayConfig;
pub use core::{classify, Clock, ResourceState, Tier};
pub use engine::{DecayEngine, EngineError, Report};
pub use store::{JsonFileStore, MemoryStore, StateStore, StoreError};
