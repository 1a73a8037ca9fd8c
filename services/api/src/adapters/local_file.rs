//! services/api/src/adapters/local_file.rs
//!
//! A `LocalStore` that keeps every key in a single JSON object on disk. Each
//! write replaces the file atomically, so a crash leaves either the old or the
//! new contents but never a torn file.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use study_planner_core::ports::{LocalStore, PortError, PortResult};
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, creating parent directories as needed.
    ///
    /// A missing file is an empty store. An unreadable file is set aside and
    /// the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> PortResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    let aside = path.with_extension("corrupt");
                    warn!(path = %path.display(), error = %e, "Local store file unreadable; starting empty");
                    fs::rename(&path, &aside).map_err(io_error)?;
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(io_error(e)),
        };

        info!(path = %path.display(), keys = entries.len(), "Local store opened");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Applies `change` and persists the result. The in-memory map is only
    /// updated once the file has been replaced.
    fn update<F>(&self, change: F) -> PortResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let mut next = entries.clone();
        change(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> PortResult<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let json =
            serde_json::to_vec_pretty(entries).map_err(|e| PortError::Unexpected(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
        tmp.write_all(&json).map_err(io_error)?;
        tmp.as_file().sync_all().map_err(io_error)?;
        tmp.persist(&self.path)
            .map_err(|e| PortError::Unexpected(e.error.to_string()))?;
        Ok(())
    }
}

fn io_error(e: std::io::Error) -> PortError {
    PortError::Unexpected(format!("local store I/O: {}", e))
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
