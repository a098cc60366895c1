//! Derived folder-type index.
//!
//! Maps folder paths to the content type declared for them, aggregated from
//! every cached configuration. An index instance is immutable once built;
//! the orchestrator rebuilds a fresh one after each store mutation and
//! publishes it with a single atomic swap, so readers can never observe a
//! partially-updated index.

use rustc_hash::FxHashMap;

use crate::paths;
use crate::reader::FolderTypes;

/// Immutable folder-path → type-name snapshot.
#[derive(Debug, Default)]
pub(crate) struct FolderTypeIndex {
    types: FxHashMap<String, String>,
}

impl FolderTypeIndex {
    /// Union of all site projections, module projection last so its
    /// declarations win on key collision.
    pub fn rebuild<'a, C, I>(site_configs: I, module_config: Option<&C>) -> Self
    where
        C: FolderTypes + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        let mut types = FxHashMap::default();
        for config in site_configs {
            absorb(&mut types, config);
        }
        if let Some(module) = module_config {
            absorb(&mut types, module);
        }
        Self { types }
    }

    /// Whether `path` names a folder with a registered type.
    pub fn contains(&self, path: &str) -> bool {
        self.types.contains_key(&paths::bounded(path))
    }

    /// Type registered for the immediate parent folder of `path`.
    pub fn parent_type(&self, path: &str) -> Option<&str> {
        let parent = paths::parent_folder(path)?;
        self.types.get(&paths::bounded(parent)).map(String::as_str)
    }
}

fn absorb(types: &mut FxHashMap<String, String>, config: &impl FolderTypes) {
    for (folder, type_name) in config.folder_types() {
        types.insert(paths::bounded(&folder), type_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Types(Vec<(&'static str, &'static str)>);

    impl FolderTypes for Types {
        fn folder_types(&self) -> FxHashMap<String, String> {
            self.0
                .iter()
                .map(|(folder, ty)| ((*folder).to_owned(), (*ty).to_owned()))
                .collect()
        }
    }

    #[test]
    fn test_parent_type() {
        let site = Types(vec![("/sites/a/news", "article")]);
        let index = FolderTypeIndex::rebuild([&site], None::<&Types>);

        assert_eq!(index.parent_type("/sites/a/news/item"), Some("article"));
        assert_eq!(index.parent_type("/sites/a/other/item"), None);
        assert_eq!(index.parent_type("/"), None);
    }

    #[test]
    fn test_module_wins_on_collision() {
        let site = Types(vec![("/shared", "site-type")]);
        let module = Types(vec![("/shared", "module-type")]);
        let index = FolderTypeIndex::rebuild([&site], Some(&module));

        assert_eq!(index.parent_type("/shared/item"), Some("module-type"));
    }

    #[test]
    fn test_contains_normalizes_separators() {
        let site = Types(vec![("/sites/a/news/", "article")]);
        let index = FolderTypeIndex::rebuild([&site], None::<&Types>);

        assert!(index.contains("/sites/a/news"));
        assert!(index.contains("/sites/a/news/"));
        assert!(!index.contains("/sites/a/new"));
    }

    #[test]
    fn test_empty_rebuild() {
        let index = FolderTypeIndex::rebuild([], None::<&Types>);
        assert!(!index.contains("/anything"));
    }
}
