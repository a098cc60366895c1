//! In-memory per-site configuration resolution for hierarchical content
//! repositories.
//!
//! A [`ConfigCache`] holds one parsed configuration object per sitemap
//! configuration file found in the repository, a single merged configuration
//! aggregated from all installed modules, a derived folder-path → content-type
//! index, and a structure-id → path memo. It is populated once by
//! [`ConfigCache::initialize`] and then kept consistent by targeted
//! [`update`](ConfigCache::update)/[`remove`](ConfigCache::remove) calls
//! driven by the publish pipeline; the repository is never re-scanned per
//! change.
//!
//! Lookups resolve the *most specific* configuration for a path: the stored
//! base path that is the longest separator-bounded prefix of the query, with
//! the merged module configuration as the global fallback.
//!
//! The repository access layer and the configuration parser are external
//! collaborators, consumed through the [`ContentRepository`] and
//! [`ConfigurationReader`] traits.
//!
//! # Example
//!
//! ```ignore
//! use siteconf::{ConfigCache, ProjectVariant, ResourceTypes, ResourceTypeId};
//!
//! let cache = ConfigCache::new(
//!     repo,
//!     reader,
//!     ResourceTypes {
//!         sitemap_config: ResourceTypeId(20),
//!         module_config: ResourceTypeId(21),
//!     },
//!     ProjectVariant::Online,
//! );
//! cache.initialize();
//!
//! // Request-serving side:
//! let config = cache
//!     .site_config("/sites/a/news/article-3")
//!     .or_else(|| cache.module_config());
//! ```

mod cache;
mod classify;
mod error;
mod paths;
mod reader;
mod repository;

pub use cache::{ConfigCache, ProjectVariant};
pub use classify::{CONFIG_SUFFIX, ResourceKind, ResourceTypes, base_path, is_temp_file};
pub use error::CacheError;
pub use reader::{ConfigurationReader, FolderTypes, ParseError};
pub use repository::{
    ContentRepository, RepositoryError, ResourceMetadata, ResourceState, ResourceTypeId,
    StructureId,
};
