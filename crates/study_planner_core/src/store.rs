//! crates/study_planner_core/src/store.rs
//!
//! An in-process `LocalStore`, plus the JSON helpers every repository uses to
//! talk to whichever `LocalStore` it was given.

use crate::ports::{LocalStore, PortError, PortResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{error, warn};

/// A `LocalStore` backed by a map. Values live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

//=========================================================================================
// Local Tier Helpers
//=========================================================================================

/// Reads a raw string. Store failures are logged and read as absent.
pub(crate) fn read_raw(local: &dyn LocalStore, key: &str) -> Option<String> {
    match local.get(key) {
        Ok(value) => value,
        Err(e) => {
            error!(key, error = %e, "Local store read failed");
            None
        }
    }
}

/// Reads and decodes a JSON value. Corrupt values are logged and read as absent.
pub(crate) fn read_json<T: DeserializeOwned>(local: &dyn LocalStore, key: &str) -> Option<T> {
    let raw = read_raw(local, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable local value");
            None
        }
    }
}

/// Writes a raw string. Returns whether the value was persisted.
pub(crate) fn write_raw(local: &dyn LocalStore, key: &str, value: &str) -> bool {
    match local.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            error!(key, error = %e, "Local store write failed; change was not persisted");
            false
        }
    }
}

pub(crate) fn write_json<T: Serialize>(local: &dyn LocalStore, key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(raw) => write_raw(local, key, &raw),
        Err(e) => {
            error!(key, error = %e, "Failed to encode value for the local store");
            false
        }
    }
}

pub(crate) fn remove(local: &dyn LocalStore, key: &str) -> bool {
    match local.remove(key) {
        Ok(()) => true,
        Err(e) => {
            error!(key, error = %e, "Local store remove failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn corrupt_json_reads_as_absent() {
        let store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        assert_eq!(read_json::<Vec<String>>(&store, "k"), None);
    }
}
