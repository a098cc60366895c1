//! Structure-id → root-path memo.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::repository::{RepositoryError, StructureId};

/// Best-effort memo of resource root paths by structure id.
///
/// Entries have no expiry; correctness depends entirely on the orchestrator
/// evicting an id before describing its new path, so a stale path can never
/// be served.
#[derive(Debug, Default)]
pub(crate) struct PathCache {
    entries: Mutex<FxHashMap<StructureId, String>>,
}

impl PathCache {
    /// Cached path for `id`, or load-and-memoize via `load` on a miss.
    ///
    /// The lock is not held across the load, so two concurrent misses may
    /// both read the repository; the last write wins and both reads are
    /// valid.
    pub fn resolve_with(
        &self,
        id: StructureId,
        load: impl FnOnce() -> Result<String, RepositoryError>,
    ) -> Result<String, RepositoryError> {
        if let Some(path) = self.entries.lock().get(&id) {
            return Ok(path.clone());
        }
        let path = load()?;
        self.entries.lock().insert(id, path.clone());
        Ok(path)
    }

    /// Drop any memoized path for `id`.
    pub fn invalidate(&self, id: StructureId) {
        self.entries.lock().remove(&id);
    }

    /// Record the authoritative path for `id`, evicting any prior entry.
    pub fn record(&self, id: StructureId, root_path: &str) {
        self.entries.lock().insert(id, root_path.to_owned());
    }

    #[cfg(test)]
    pub fn contains(&self, id: StructureId) -> bool {
        self.entries.lock().contains_key(&id)
    }
}
