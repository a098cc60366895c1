//! Cache error taxonomy.

use thiserror::Error;

use crate::reader::ParseError;
use crate::repository::{RepositoryError, StructureId};

/// Errors surfaced by cache operations.
///
/// Lookups never fail for "not configured here" (they return `None`); only
/// identity resolution and synchronous update failures are true errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The repository no longer holds a resource with this identity.
    #[error("no resource with structure id {0}")]
    NotFound(StructureId),

    /// A configuration resource could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The repository failed while reading configuration data.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CacheError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}
