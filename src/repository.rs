//! Content repository collaborator interface.
//!
//! The cache never walks the repository itself; it consumes these narrow
//! traits. `read_resource` serves identity resolution and targeted re-reads,
//! `list_resources_of_type` is used only by the initial full scan.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Stable unique identifier of a repository resource, independent of its
/// current path. Survives moves and renames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructureId(Uuid);

impl StructureId {
    /// Mint a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for StructureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Numeric resource-type id assigned by the repository installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceTypeId(pub u32);

/// Publication state delivered with change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceState {
    New,
    Changed,
    Deleted,
    #[default]
    Unchanged,
}

/// Metadata describing one repository resource.
#[derive(Debug, Clone)]
pub struct ResourceMetadata {
    pub id: StructureId,
    /// Absolute root path of the resource within the repository.
    pub root_path: String,
    pub type_id: ResourceTypeId,
    pub state: ResourceState,
}

/// Errors surfaced by the repository access layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no resource with structure id {0}")]
    NotFound(StructureId),

    #[error("no resource at `{0}`")]
    NotFoundAt(String),

    #[error("repository access failed: {0}")]
    Access(String),
}

/// Read access to the hierarchical content repository.
///
/// Implementations are expected to reflect exactly one project variant
/// (online or offline); the cache never mixes the two.
pub trait ContentRepository: Send + Sync {
    /// Read a single resource by its structure id.
    fn read_resource(&self, id: StructureId) -> Result<ResourceMetadata, RepositoryError>;

    /// Read a single resource by its root path.
    fn read_resource_at(&self, root_path: &str) -> Result<ResourceMetadata, RepositoryError>;

    /// Enumerate all resources of the given type below `root`.
    fn list_resources_of_type(
        &self,
        root: &str,
        type_id: ResourceTypeId,
    ) -> Result<Vec<ResourceMetadata>, RepositoryError>;
}

// A shared repository handle is itself a repository, so one connection can
// serve both the cache and the rest of the system.
impl<T: ContentRepository + ?Sized> ContentRepository for std::sync::Arc<T> {
    fn read_resource(&self, id: StructureId) -> Result<ResourceMetadata, RepositoryError> {
        (**self).read_resource(id)
    }

    fn read_resource_at(&self, root_path: &str) -> Result<ResourceMetadata, RepositoryError> {
        (**self).read_resource_at(root_path)
    }

    fn list_resources_of_type(
        &self,
        root: &str,
        type_id: ResourceTypeId,
    ) -> Result<Vec<ResourceMetadata>, RepositoryError> {
        (**self).list_resources_of_type(root, type_id)
    }
}
