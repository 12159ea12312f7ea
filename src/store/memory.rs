//! In-memory store.

use super::{StateStore, StoreError};
use crate::core::ResourceState;

/// Keeps the record in memory. Counts writes so callers can observe
/// write-through behavior.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Option<ResourceState>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ResourceState) -> Self {
        Self {
            state: Some(state),
            writes: 0,
        }
    }

    /// Current record without going through `read`.
    pub fn state(&self) -> Option<&ResourceState> {
        self.state.as_ref()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StateStore for MemoryStore {
    fn read(&self) -> Result<Option<ResourceState>, StoreError> {
        Ok(self.state)
    }

    fn save(&mut self, state: &ResourceState) -> Result<(), StoreError> {
        self.state = Some(*state);
        self.writes += 1;
        Ok(())
    }
}
