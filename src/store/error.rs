//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the persisted state
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read, written, synced or renamed
    #[error("I/O failed on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding the record failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// The stored bytes are not a valid record
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// The record parsed but holds values that cannot be trusted
    #[error("Stored state is corrupt: {0}")]
    Corrupt(String),
}
