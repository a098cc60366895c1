//! Configuration cache orchestrator.
//!
//! Composes the per-site configuration store, the merged module
//! configuration, the derived folder-type index and the structure-id path
//! memo, and keeps them consistent under a stream of repository change
//! notifications.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                       ConfigCache                              │
//! │                                                                │
//! │  change notification ──► classify ──► targeted re-parse        │
//! │                                          │                     │
//! │  RwLock<CacheState> ◄────────────────────┘                     │
//! │  ├── SiteConfigStore   (base path → Arc<Config>)               │
//! │  └── module config     (merged singleton)                      │
//! │           │ rebuild after every store mutation                 │
//! │           ▼                                                    │
//! │  ArcSwap<FolderTypeIndex>   (published as one atomic swap)     │
//! │                                                                │
//! │  Mutex<PathCache>           (independent, evict-before-record) │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes are serialized by the state write lock for the whole classified
//! change, so no reader ever observes a store and index from two different
//! generations. Site configurations are independent per base path and are
//! replaced one at a time; module configurations are interdependent and are
//! always re-merged from scratch. This asymmetry is deliberate and must not
//! be "optimized" away.

mod folder_types;
mod path_cache;
mod store;

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::RwLock;
use tracing::{debug, error, info};

use crate::classify::{self, ResourceKind, ResourceTypes};
use crate::error::CacheError;
use crate::reader::ConfigurationReader;
use crate::repository::{
    ContentRepository, ResourceMetadata, ResourceState, ResourceTypeId, StructureId,
};
use folder_types::FolderTypeIndex;
use path_cache::PathCache;
use store::SiteConfigStore;

/// Which project variant a cache instance serves.
///
/// Published and unpublished content must not cross-contaminate, so online
/// and offline caches are always separate instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectVariant {
    /// Published content, as served to visitors.
    Online,
    /// Work-in-progress content, as seen by editors.
    Offline,
}

impl ProjectVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// Lifecycle phase of a cache instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Initializing,
    Ready,
}

/// State guarded by the coarse lock: everything whose consistency spans a
/// single mutation.
struct CacheState<C> {
    phase: Phase,
    site_configs: SiteConfigStore<C>,
    module_config: Option<Arc<C>>,
}

/// In-memory cache of per-site configuration data for one project variant.
///
/// Created empty, populated by [`initialize`](Self::initialize), then kept
/// live through [`update`](Self::update)/[`remove`](Self::remove) calls
/// delivered by the publish pipeline. All operations run synchronously on
/// the caller's thread.
pub struct ConfigCache<R, D: ConfigurationReader> {
    repo: R,
    reader: D,
    types: ResourceTypes,
    variant: ProjectVariant,
    state: RwLock<CacheState<D::Config>>,
    folder_types: ArcSwap<FolderTypeIndex>,
    path_cache: PathCache,
}

impl<R, D> ConfigCache<R, D>
where
    R: ContentRepository,
    D: ConfigurationReader,
{
    /// Create an empty cache for the given project variant.
    pub fn new(repo: R, reader: D, types: ResourceTypes, variant: ProjectVariant) -> Self {
        Self {
            repo,
            reader,
            types,
            variant,
            state: RwLock::new(CacheState {
                phase: Phase::Uninitialized,
                site_configs: SiteConfigStore::new(),
                module_config: None,
            }),
            folder_types: ArcSwap::from_pointee(FolderTypeIndex::default()),
            path_cache: PathCache::default(),
        }
    }

    pub const fn variant(&self) -> ProjectVariant {
        self.variant
    }

    pub fn is_online(&self) -> bool {
        self.variant == ProjectVariant::Online
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().phase == Phase::Ready
    }

    // ------------------------------------------------------------------
    // Maintenance entry points
    // ------------------------------------------------------------------

    /// Populate the cache with a full repository scan.
    ///
    /// Idempotent: calling it again resets and rebuilds everything. One
    /// unreadable candidate never aborts the scan; it is logged and skipped
    /// so a single corrupt configuration cannot break the whole cache.
    pub fn initialize(&self) {
        let mut state = self.state.write();
        state.phase = Phase::Initializing;
        state.site_configs.clear();

        let candidates = match self
            .repo
            .list_resources_of_type("/", self.types.sitemap_config)
        {
            Ok(candidates) => candidates,
            Err(err) => {
                error!(
                    variant = self.variant.as_str(),
                    %err,
                    "enumerating sitemap configuration candidates failed"
                );
                Vec::new()
            }
        };

        for candidate in &candidates {
            // The type filter alone is not enough: the path convention must
            // match too, otherwise a stray resource of the right type would
            // land under a bogus base path.
            let kind = self.types.classify(&candidate.root_path, candidate.type_id);
            if kind != ResourceKind::SitemapConfig {
                continue;
            }
            if let Err(err) = self.update_locked(
                &mut state,
                candidate.id,
                &candidate.root_path,
                candidate.type_id,
                candidate.state,
            ) {
                error!(
                    path = %candidate.root_path,
                    %err,
                    "skipping unreadable sitemap configuration"
                );
            }
        }

        self.refresh_module_config(&mut state);
        self.swap_folder_types(&state);
        state.phase = Phase::Ready;

        info!(
            variant = self.variant.as_str(),
            site_configs = state.site_configs.len(),
            "configuration cache initialized"
        );
    }

    /// Apply a change notification for one resource.
    ///
    /// Failures from the parse step propagate so a synchronous publish can
    /// visibly fail; the folder-type and path-cache bookkeeping applied
    /// before the failing step stays in place (no rollback), and the prior
    /// site entry survives because the store is only written after a
    /// successful parse.
    pub fn update(
        &self,
        id: StructureId,
        root_path: &str,
        type_id: ResourceTypeId,
        state: ResourceState,
    ) -> Result<(), CacheError> {
        if classify::is_temp_file(root_path) {
            debug!(path = %root_path, "ignoring temporary file");
            return Ok(());
        }
        let mut guard = self.state.write();
        if guard.phase == Phase::Uninitialized {
            debug!(path = %root_path, "cache not initialized, ignoring update");
            return Ok(());
        }
        self.update_locked(&mut guard, id, root_path, type_id, state)
    }

    /// Remove a resource from the cache.
    pub fn remove(&self, id: StructureId, root_path: &str, type_id: ResourceTypeId) {
        if classify::is_temp_file(root_path) {
            debug!(path = %root_path, "ignoring temporary file");
            return;
        }
        let mut state = self.state.write();
        if state.phase == Phase::Uninitialized {
            debug!(path = %root_path, "cache not initialized, ignoring removal");
            return;
        }
        self.refresh_folder_types_if_indexed(&state, root_path);
        self.path_cache.invalidate(id);
        match self.types.classify(root_path, type_id) {
            ResourceKind::SitemapConfig => {
                let base = classify::base_path(root_path);
                if state.site_configs.remove(base).is_some() {
                    info!(path = %root_path, "removed sitemap configuration from cache");
                }
                self.swap_folder_types(&state);
            }
            ResourceKind::ModuleConfig => {
                // Removing one module resource still requires re-merging all
                // remaining ones.
                self.refresh_module_config(&mut state);
                self.swap_folder_types(&state);
            }
            ResourceKind::Other => {}
        }
    }

    /// Publish-pipeline entry point: apply one update notification, logging
    /// failures so one corrupt resource cannot abort the rest of a batch.
    pub fn update_resource(&self, resource: &ResourceMetadata) {
        if let Err(err) = self.update(
            resource.id,
            &resource.root_path,
            resource.type_id,
            resource.state,
        ) {
            error!(path = %resource.root_path, %err, "updating cached configuration failed");
        }
    }

    /// Publish-pipeline entry point: apply one removal notification.
    pub fn remove_resource(&self, resource: &ResourceMetadata) {
        self.remove(resource.id, &resource.root_path, resource.type_id);
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Most specific sitemap configuration applying to `path`, if any.
    pub fn site_config(&self, path: &str) -> Option<Arc<D::Config>> {
        self.state.read().site_configs.lookup(path).cloned()
    }

    /// The merged module configuration. `Some` once
    /// [`initialize`](Self::initialize) has completed (provided the reader
    /// produced one).
    pub fn module_config(&self) -> Option<Arc<D::Config>> {
        self.state.read().module_config.clone()
    }

    /// Type registered for the immediate parent folder of `path`, or `None`
    /// if the parent is unknown or unregistered.
    pub fn parent_folder_type(&self, path: &str) -> Option<String> {
        self.folder_types
            .load()
            .parent_type(path)
            .map(|type_name| type_name.to_owned())
    }

    /// Current root path of the resource with the given structure id.
    ///
    /// Served from the memo when possible; a miss costs one repository read.
    pub fn path_for_structure_id(&self, id: StructureId) -> Result<String, CacheError> {
        let path = self
            .path_cache
            .resolve_with(id, || self.repo.read_resource(id).map(|res| res.root_path))?;
        Ok(path)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Shared body of `update` and the initialize scan, with the state
    /// write lock held: index pre-refresh, path-cache bookkeeping, then the
    /// classified store mutation.
    fn update_locked(
        &self,
        state: &mut CacheState<D::Config>,
        id: StructureId,
        root_path: &str,
        type_id: ResourceTypeId,
        resource_state: ResourceState,
    ) -> Result<(), CacheError> {
        // The change may alter what the correct type for this folder is, so
        // refresh before applying the main change.
        self.refresh_folder_types_if_indexed(state, root_path);
        self.path_cache.invalidate(id);
        self.path_cache.record(id, root_path);
        match self.types.classify(root_path, type_id) {
            ResourceKind::SitemapConfig => {
                self.load_sitemap_config(state, root_path)?;
                self.swap_folder_types(state);
                info!(
                    path = %root_path,
                    state = ?resource_state,
                    "updated sitemap configuration"
                );
            }
            ResourceKind::ModuleConfig => {
                self.refresh_module_config(state);
                self.swap_folder_types(state);
            }
            ResourceKind::Other => {}
        }
        Ok(())
    }

    /// Re-read and re-parse one sitemap configuration, storing it under its
    /// base path. The store is only written after a successful parse, so the
    /// prior entry survives a failure.
    fn load_sitemap_config(
        &self,
        state: &mut CacheState<D::Config>,
        root_path: &str,
    ) -> Result<(), CacheError> {
        let base = classify::base_path(root_path);
        let resource = self.repo.read_resource_at(root_path)?;
        let config = self.reader.parse_sitemap_config(base, &resource)?;
        state.site_configs.insert(base, Arc::new(config));
        Ok(())
    }

    /// Replace the merged module configuration wholesale.
    ///
    /// On failure the previous merged configuration stays queryable;
    /// availability wins over strictness for maintenance paths.
    fn refresh_module_config(&self, state: &mut CacheState<D::Config>) {
        match self.reader.read_module_configs() {
            Ok(merged) => state.module_config = Some(Arc::new(merged)),
            Err(err) => {
                error!(%err, "re-merging module configurations failed, keeping previous");
            }
        }
    }

    /// Refresh the index if `path` is a currently indexed folder.
    fn refresh_folder_types_if_indexed(&self, state: &CacheState<D::Config>, root_path: &str) {
        if self.folder_types.load().contains(root_path) {
            self.swap_folder_types(state);
        }
    }

    /// Build the replacement folder-type index off to the side and publish
    /// it as one atomic swap. Only called with the state write lock held.
    fn swap_folder_types(&self, state: &CacheState<D::Config>) {
        let index = FolderTypeIndex::rebuild(
            state.site_configs.values().map(|config| config.as_ref()),
            state.module_config.as_deref(),
        );
        self.folder_types.store(Arc::new(index));
    }
}
