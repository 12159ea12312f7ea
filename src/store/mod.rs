//! Durable persistence of the single `ResourceState` record.
//!
//! Stores are passive: they read and write one record and hold no business
//! logic. Unreadable or corrupt data is reported by [`StateStore::read`] and
//! absorbed by [`StateStore::load`], which falls back to full health.
//! Write failures are always returned to the caller.

use crate::core::ResourceState;
use chrono::{DateTime, Utc};

pub mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::{atomic_write, JsonFileStore};
pub use memory::MemoryStore;

/// Persistence for the resource record.
///
/// No locking happens at this layer; the engine serializes access.
pub trait StateStore: Send {
    /// Read the stored record.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<ResourceState>, StoreError>;

    /// Replace the stored record. Readers never observe a partial write.
    fn save(&mut self, state: &ResourceState) -> Result<(), StoreError>;

    /// Read the stored record, or full health at `now` if there is none or it
    /// cannot be read.
    fn load(&self, now: DateTime<Utc>) -> ResourceState {
        match self.read() {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::debug!("no stored state, starting at full health");
                ResourceState::fresh(now)
            }
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable state, starting at full health");
                ResourceState::fresh(now)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn read(&self) -> Result<Option<ResourceState>, StoreError> {
            Err(StoreError::Deserialization("truncated".to_string()))
        }

        fn save(&mut self, _state: &ResourceState) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn load_defaults_when_empty() {
        let now = Utc.with_ymd_and_hms(2024, 2, 2, 2, 2, 2).unwrap();
        let store = MemoryStore::new();
        assert_eq!(store.load(now), ResourceState::fresh(now));
    }

    #[test]
    fn load_defaults_when_read_fails() {
        let now = Utc.with_ymd_and_hms(2024, 2, 2, 2, 2, 2).unwrap();
        assert_eq!(BrokenStore.load(now), ResourceState::fresh(now));
    }

    #[test]
    fn load_returns_stored_record() {
        let then = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap();
        let stored = ResourceState::new(12.5, then);
        let store = MemoryStore::with_state(stored);

        assert_eq!(store.load(now), stored);
    }
}
