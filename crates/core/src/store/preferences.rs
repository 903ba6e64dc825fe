//! Blob store trait and its file and in-memory implementations.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::debug;

use super::StoreError;
use crate::constants::PREFERENCES_FILE_SUFFIX;

/// Key/value persistence for small JSON blobs.
///
/// Implementations are synchronous; callers that must not block put
/// writes behind the write actor.
pub trait PreferencesStore: Send + Sync {
    fn get_blob(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put_blob(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Stores each key as `<dir>/<key>.json`, written via a temp file and
/// rename so readers never observe a half-written blob.
pub struct FilePreferencesStore {
    dir: PathBuf,
}

impl FilePreferencesStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", key, PREFERENCES_FILE_SUFFIX))
    }
}

impl PreferencesStore for FilePreferencesStore {
    fn get_blob(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn put_blob(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".{}{}.tmp", key, PREFERENCES_FILE_SUFFIX));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        debug!("Persisted preference '{}' ({} bytes)", key, value.len());
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Clone, Default)]
pub struct MemoryPreferencesStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPreferencesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesStore for MemoryPreferencesStore {
    fn get_blob(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn put_blob(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryPreferencesStore::new();
        assert_eq!(store.get_blob("favorites").unwrap(), None);

        store.put_blob("favorites", "[]").unwrap();
        assert_eq!(store.get_blob("favorites").unwrap().as_deref(), Some("[]"));

        store.put_blob("favorites", r#"[{"a":1}]"#).unwrap();
        assert_eq!(
            store.get_blob("favorites").unwrap().as_deref(),
            Some(r#"[{"a":1}]"#)
        );
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let store = MemoryPreferencesStore::new();
        assert!(matches!(
            store.get_blob("").unwrap_err(),
            StoreError::InvalidKey(_)
        ));
        assert!(matches!(
            store.put_blob("../escape", "x").unwrap_err(),
            StoreError::InvalidKey(_)
        ));
        assert!(matches!(
            store.put_blob("UPPER", "x").unwrap_err(),
            StoreError::InvalidKey(_)
        ));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferencesStore::new(dir.path());

        assert_eq!(store.get_blob("favorites").unwrap(), None);
        store.put_blob("favorites", r#"[{"symbol":"AAPL"}]"#).unwrap();
        assert_eq!(
            store.get_blob("favorites").unwrap().as_deref(),
            Some(r#"[{"symbol":"AAPL"}]"#)
        );

        // Overwrite goes through the temp file, so no partial state.
        store.put_blob("favorites", "[]").unwrap();
        assert_eq!(store.get_blob("favorites").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_creates_directory_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deeper").join("still");
        let store = FilePreferencesStore::new(&nested);
        store.put_blob("favorites", "[]").unwrap();
        assert!(nested.join("favorites.json").exists());
    }
}
