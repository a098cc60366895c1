//! Configuration parsing collaborator interface.
//!
//! Parsing and module merging are pure operations with no caching
//! responsibility; all memoization lives in [`crate::ConfigCache`].

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::repository::ResourceMetadata;

/// Folder-type projection every parsed configuration object exposes.
pub trait FolderTypes {
    /// Mapping from folder root path to the content type declared for it.
    fn folder_types(&self) -> FxHashMap<String, String>;
}

/// A configuration resource could not be turned into a configuration object.
#[derive(Debug, Error)]
#[error("failed to parse configuration at `{path}`: {reason}")]
pub struct ParseError {
    pub path: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Turns raw configuration resources into parsed configuration objects.
pub trait ConfigurationReader: Send + Sync {
    /// Parsed configuration object type. Opaque to the cache apart from its
    /// folder-type projection.
    type Config: FolderTypes + Send + Sync;

    /// Parse one sitemap configuration resource scoped to `base_path`.
    fn parse_sitemap_config(
        &self,
        base_path: &str,
        resource: &ResourceMetadata,
    ) -> Result<Self::Config, ParseError>;

    /// Read and merge the configuration resources of all installed modules.
    ///
    /// Module configurations cross-reference each other, so the result is
    /// always derived from scratch rather than patched incrementally.
    fn read_module_configs(&self) -> Result<Self::Config, ParseError>;
}

impl<T: ConfigurationReader + ?Sized> ConfigurationReader for std::sync::Arc<T> {
    type Config = T::Config;

    fn parse_sitemap_config(
        &self,
        base_path: &str,
        resource: &ResourceMetadata,
    ) -> Result<Self::Config, ParseError> {
        (**self).parse_sitemap_config(base_path, resource)
    }

    fn read_module_configs(&self) -> Result<Self::Config, ParseError> {
        (**self).read_module_configs()
    }
}
