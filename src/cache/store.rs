//! Per-site configuration store with longest-prefix resolution.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::paths;

/// Sitemap configuration entries keyed by base path.
///
/// Base paths are stored without trailing separators (as produced by
/// [`crate::classify::base_path`]); the lookup normalizes both sides to the
/// separator-bounded form before comparing.
#[derive(Debug)]
pub(crate) struct SiteConfigStore<C> {
    entries: FxHashMap<String, Arc<C>>,
}

impl<C> SiteConfigStore<C> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Insert or replace the entry for a base path.
    pub fn insert(&mut self, base_path: &str, config: Arc<C>) {
        self.entries.insert(base_path.to_owned(), config);
    }

    /// Remove the entry for a base path, returning it if present.
    pub fn remove(&mut self, base_path: &str) -> Option<Arc<C>> {
        self.entries.remove(base_path)
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<C>> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Most specific entry whose base path is a prefix of `path`.
    ///
    /// With entries at `/a`, `/a/b/c` and `/a/b/x`, the query `/a/b/c/d`
    /// resolves to `/a/b/c` and the query `/a/b/z` falls back to `/a`.
    pub fn lookup(&self, path: &str) -> Option<&Arc<C>> {
        let query = paths::bounded(path);
        self.entries
            .keys()
            .filter(|key| query.starts_with(&paths::bounded(key)))
            // Any two prefixes of a common string are prefix-comparable, so
            // the lexicographically greatest matching key is also the longest.
            .max()
            .and_then(|key| self.entries.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(keys: &[&str]) -> SiteConfigStore<String> {
        let mut store = SiteConfigStore::new();
        for key in keys {
            store.insert(key, Arc::new((*key).to_owned()));
        }
        store
    }

    fn resolve<'a>(store: &'a SiteConfigStore<String>, path: &str) -> Option<&'a str> {
        store.lookup(path).map(|config| config.as_str())
    }

    #[test]
    fn test_longest_prefix_wins() {
        let store = store(&["/a", "/a/b/c", "/a/b/x"]);

        assert_eq!(resolve(&store, "/a/b/c/d"), Some("/a/b/c"));
        assert_eq!(resolve(&store, "/a/b/x"), Some("/a/b/x"));
        assert_eq!(resolve(&store, "/a/b/z"), Some("/a"));
        assert_eq!(resolve(&store, "/z"), None);
    }

    #[test]
    fn test_separator_boundary() {
        // `/a/b` must not be treated as a prefix of its sibling `/a/bx`.
        let store = store(&["/a/b"]);

        assert_eq!(resolve(&store, "/a/bx"), None);
        assert_eq!(resolve(&store, "/a/bx/y"), None);
        assert_eq!(resolve(&store, "/a/b/y"), Some("/a/b"));
    }

    #[test]
    fn test_exact_match() {
        let store = store(&["/a/b"]);
        assert_eq!(resolve(&store, "/a/b"), Some("/a/b"));
    }

    #[test]
    fn test_root_entry_matches_everything() {
        let store = store(&["/", "/sites/a"]);

        assert_eq!(resolve(&store, "/anything/at/all"), Some("/"));
        assert_eq!(resolve(&store, "/sites/a/page"), Some("/sites/a"));
    }

    #[test]
    fn test_empty_store() {
        let store = store(&[]);
        assert_eq!(resolve(&store, "/a"), None);
    }

    #[test]
    fn test_replace_keeps_single_entry() {
        let mut store = store(&["/a"]);
        store.insert("/a", Arc::new("replacement".to_owned()));

        assert_eq!(store.len(), 1);
        assert_eq!(resolve(&store, "/a/x"), Some("replacement"));
    }
}
