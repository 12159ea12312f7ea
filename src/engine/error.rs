//! Engine error types.

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur while running an engine operation
#[derive(Debug, Error)]
pub enum EngineError {
    /// Persisting the settled state failed; the operation did not take effect
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A previous operation panicked while holding the state lock
    #[error("State lock poisoned by a panicked operation")]
    LockPoisoned,
}
