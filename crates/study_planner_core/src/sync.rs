//! crates/study_planner_core/src/sync.rs
//!
//! The remote tier shared by every repository: an optional `RemoteStore`
//! handle, bounded reads, and fire-and-forget writes tracked in the background.

use crate::ports::{PortError, PortResult, RemoteStore};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(3000);

/// Per-key record of local writes: how many remote upserts are still pending
/// and how many writes have ever started.
#[derive(Debug, Default, Clone, Copy)]
struct KeyWrites {
    pending: usize,
    generation: u64,
}

type WriteLog = Arc<Mutex<HashMap<String, KeyWrites>>>;

/// Decided once at startup and cloned into each repository.
///
/// With no store configured every operation is local-only.
#[derive(Clone)]
pub struct RemoteSync {
    store: Option<Arc<dyn RemoteStore>>,
    read_timeout: Duration,
    tracker: TaskTracker,
    writes: WriteLog,
}

impl RemoteSync {
    pub fn new(store: Option<Arc<dyn RemoteStore>>, read_timeout: Duration) -> Self {
        Self {
            store,
            read_timeout,
            tracker: TaskTracker::new(),
            writes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn local_only() -> Self {
        Self::new(None, DEFAULT_READ_TIMEOUT)
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    /// Runs a keyed remote read and hands the row to `warm` before returning it.
    ///
    /// Yields `None` when the remote is absent, has no row, fails, or times out.
    /// It also yields `None` when a local write for `key` is in flight or started
    /// while the read was pending, so an older remote row never replaces it.
    pub(crate) async fn fetch<T, F, Fut, W>(
        &self,
        key: &str,
        table: &'static str,
        fetch: F,
        warm: W,
    ) -> Option<T>
    where
        F: FnOnce(Arc<dyn RemoteStore>) -> Fut,
        Fut: Future<Output = PortResult<T>>,
        W: FnOnce(&T),
    {
        let store = self.store.clone()?;

        let Some(seen) = self.settled_generation(key) else {
            debug!(table, key, "Remote write in flight; serving local copy");
            return None;
        };

        let value = match tokio::time::timeout(self.read_timeout, fetch(store)).await {
            Ok(Ok(value)) => value,
            Ok(Err(PortError::NotFound(_))) => {
                debug!(table, key, "No remote row yet");
                return None;
            }
            Ok(Err(e)) => {
                warn!(table, key, error = %e, "Remote fetch failed; falling back to local store");
                return None;
            }
            Err(_) => {
                warn!(
                    table,
                    key,
                    timeout_ms = self.read_timeout.as_millis() as u64,
                    "Remote fetch timed out; falling back to local store"
                );
                return None;
            }
        };

        // Held while warming so a write cannot start between the check and the copy.
        let writes = self.writes.lock().ok()?;
        let current = writes.get(key).copied().unwrap_or_default();
        if current.pending > 0 || current.generation != seen {
            debug!(table, key, "Local write started during remote fetch; serving local copy");
            return None;
        }
        warm(&value);
        Some(value)
    }

    /// Applies `write_local`, then spawns the remote write and returns
    /// immediately. Remote failures are logged and never undo the local write.
    pub(crate) fn write<L, F, Fut>(&self, key: String, table: &'static str, write_local: L, push: F)
    where
        L: FnOnce(),
        F: FnOnce(Arc<dyn RemoteStore>) -> Fut,
        Fut: Future<Output = PortResult<()>> + Send + 'static,
    {
        let Some(store) = self.store.clone() else {
            write_local();
            return;
        };
        // Registered before the local write so concurrent reads see it.
        let guard = PendingWrite::begin(self.writes.clone(), key);
        write_local();
        let upsert = push(store);
        self.tracker.spawn(async move {
            match upsert.await {
                Ok(()) => debug!(table, key = %guard.key, "Remote sync complete"),
                Err(e) => {
                    warn!(table, key = %guard.key, error = %e, "Remote sync failed; local copy kept")
                }
            }
            drop(guard);
        });
    }

    /// Waits for every spawned write to finish. Used at shutdown and in tests.
    pub async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// The write generation of `key`, or `None` while a write is pending.
    fn settled_generation(&self, key: &str) -> Option<u64> {
        let writes = self.writes.lock().ok()?;
        match writes.get(key) {
            Some(w) if w.pending > 0 => None,
            Some(w) => Some(w.generation),
            None => Some(0),
        }
    }
}

/// Marks a key as having a remote write outstanding until dropped.
struct PendingWrite {
    writes: WriteLog,
    key: String,
}

impl PendingWrite {
    fn begin(writes: WriteLog, key: String) -> Self {
        if let Ok(mut map) = writes.lock() {
            let entry = map.entry(key.clone()).or_default();
            entry.pending += 1;
            entry.generation += 1;
        }
        Self { writes, key }
    }
}

impl Drop for PendingWrite {
    fn drop(&mut self) {
        if let Ok(mut map) = self.writes.lock() {
            if let Some(entry) = map.get_mut(&self.key) {
                entry.pending = entry.pending.saturating_sub(1);
            }
        }
    }
}
