//! Pure core of the health gauge.
//!
//! This module contains everything that can be computed without I/O:
//! - The persisted `ResourceState` record and its value bounds
//! - Decay and recovery arithmetic (`decay::settle`, `decay::recover`)
//! - Tier classification for presentation
//! - The `Clock` abstraction the engine samples once per operation
//!
//! Storage and locking live in `store` and `engine`.

mod clock;
pub mod decay;
mod state;
mod tier;
pub mod timestamp;

pub use clock::{Clock, ManualClock, SystemClock};
pub use decay::Settlement;
pub use state::{clamp_value, ResourceState, MAX_VALUE, MIN_VALUE};
pub use tier::{classify, Tier, DECLINING_FLOOR, HEALTHY_FLOOR, THRIVING_FLOOR};
