//! JSON file store with crash-safe writes.

use super::{StateStore, StoreError};
use crate::core::ResourceState;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically writes `data` to `path` using the write-rename pattern.
///
/// 1. Write to `{path}.tmp`
/// 2. `sync_all()` to flush to disk
/// 3. `rename` temp to final path
///
/// A failure at any step leaves the original file at `path` untouched and
/// removes the temporary file.
pub fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp_path = temp_path(path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let result = write_synced(&tmp_path, data).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".tmp");
    PathBuf::from(raw)
}

/// Stores the record as a small JSON document:
///
/// ```json
/// { "value": 90.0, "lastUpdated": "2024-05-10T13:00:00Z" }
/// ```
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn read(&self) -> Result<Option<ResourceState>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let state: ResourceState = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Deserialization(e.to_string()))?;

        state
            .sanitized()
            .map(Some)
            .ok_or_else(|| StoreError::Corrupt(format!("value {} is not finite", state.value)))
    }

    fn save(&mut self, state: &ResourceState) -> Result<(), StoreError> {
        let json =
            serde_json::to_vec_pretty(state).map_err(|e| StoreError::Serialization(e.to_string()))?;

        atomic_write(&self.path, &json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::trace!(path = %self.path.display(), value = state.value, "state saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample() -> ResourceState {
        ResourceState::new(72.5, Utc.with_ymd_and_hms(2024, 4, 4, 4, 4, 4).unwrap())
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn save_then_read_returns_record() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("state.json"));

        store.save(&sample()).unwrap();
        assert_eq!(store.read().unwrap(), Some(sample()));
    }

    #[test]
    fn saved_file_uses_persisted_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let mut store = JsonFileStore::new(&path);

        store.save(&sample()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["value"], 72.5);
        assert_eq!(json["lastUpdated"], "2024-04-04T04:04:04Z");
    }

    #[test]
    fn malformed_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, b"{\"value\": ").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.read(),
            Err(StoreError::Deserialization(_))
        ));
    }

    #[test]
    fn wrong_shape_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, br#"{"value": "lots", "lastUpdated": "2024-01-01T00:00:00Z"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.read().is_err());
    }

    #[test]
    fn out_of_range_value_is_clamped_on_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, br#"{"value": 180, "lastUpdated": "2024-01-01T00:00:00Z"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.read().unwrap().map(|s| s.value), Some(100.0));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let mut store = JsonFileStore::new(&path);

        store.save(&sample()).unwrap();
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("state.json");
        let mut store = JsonFileStore::new(&path);

        store.save(&sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_failure_is_reported_and_original_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&sample()).unwrap();

        // A directory squatting on the temp path makes File::create fail.
        fs::create_dir(temp_path(&path)).unwrap();

        let result = store.save(&ResourceState::new(1.0, Utc::now()));
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(store.read().unwrap(), Some(sample()));
    }

    #[test]
    fn unwritable_parent_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let mut store = JsonFileStore::new(blocker.join("state.json"));
        assert!(store.save(&sample()).is_err());
    }
}
