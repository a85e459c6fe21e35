//! Persisted, ordered collection of the repositories the user has searched
//! for. Every mutation performs a full read-modify-write of the serialized
//! list, which is acceptable while the list stays small (dozens of entries).

mod backend;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};

use std::sync::Arc;

use crate::types::RepositorySummary;

/// The local repository store.
///
/// Cloning is cheap and clones share the same backend slot.
#[derive(Clone)]
pub struct RepositoryStore {
    backend: Arc<dyn StorageBackend + Send + Sync>,
}

impl RepositoryStore {
    /// Build a store over an arbitrary backend.
    pub fn new(backend: impl StorageBackend + Send + Sync + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Store over the platform data directory.
    pub fn open_default() -> Self {
        Self::new(FileBackend::new())
    }

    /// Read the persisted list. A missing or malformed payload yields an
    /// empty list; parse failures are logged and never surfaced.
    pub fn load(&self) -> Vec<RepositorySummary> {
        let Some(raw) = self.backend.read() else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("discarding malformed repository list: {e}");
                Vec::new()
            }
        }
    }

    /// Append `summary` to the end of the list and rewrite the whole
    /// persisted payload. Duplicate `full_name` entries are allowed; the
    /// store does not deduplicate.
    ///
    /// Returns the new list. A failed write degrades to the in-memory
    /// result so the caller's view stays consistent within the session.
    pub fn append(&self, summary: RepositorySummary) -> Vec<RepositorySummary> {
        let mut list = self.load();
        list.push(summary);
        match serde_json::to_string(&list) {
            Ok(payload) => {
                if let Err(e) = self.backend.write(&payload) {
                    log::warn!("failed to persist repository list: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize repository list: {e}"),
        }
        list
    }

    /// Erase all persisted state owned by the application. A subsequent
    /// [`load`](Self::load) returns an empty list.
    pub fn clear(&self) {
        if let Err(e) = self.backend.clear() {
            log::warn!("failed to clear persisted state: {e}");
        }
    }
}
