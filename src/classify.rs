//! Change classification for incoming repository notifications.
//!
//! Every notification is sorted into one of three kinds before any cache
//! state is touched:
//!
//! | Kind            | Criteria                            | Cache effect        |
//! |-----------------|-------------------------------------|---------------------|
//! | `SitemapConfig` | path suffix **and** type id match   | targeted entry swap |
//! | `ModuleConfig`  | type id match                       | full re-merge       |
//! | `Other`         | anything else                       | bookkeeping only    |

use crate::paths;
use crate::repository::ResourceTypeId;

/// Path convention for sitemap configuration files, relative to the base
/// path they configure.
pub const CONFIG_SUFFIX: &str = "/.content/.config";

/// Classification of a changed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Per-subtree sitemap configuration, scoped by base path.
    SitemapConfig,
    /// Cross-cutting module configuration, merged globally.
    ModuleConfig,
    /// Not a configuration resource.
    Other,
}

/// Recognized configuration resource types of one repository installation.
#[derive(Debug, Clone, Copy)]
pub struct ResourceTypes {
    pub sitemap_config: ResourceTypeId,
    pub module_config: ResourceTypeId,
}

impl ResourceTypes {
    /// Classify a path/type combination.
    ///
    /// The type id alone is not enough for sitemap configurations: the path
    /// must also end in [`CONFIG_SUFFIX`], otherwise a stray resource of the
    /// right type would be cached under a bogus base path.
    pub fn classify(&self, root_path: &str, type_id: ResourceTypeId) -> ResourceKind {
        if root_path.ends_with(CONFIG_SUFFIX) && type_id == self.sitemap_config {
            ResourceKind::SitemapConfig
        } else if type_id == self.module_config {
            ResourceKind::ModuleConfig
        } else {
            ResourceKind::Other
        }
    }
}

/// Base path a sitemap configuration file applies to.
///
/// `/sites/a/.content/.config` configures `/sites/a`. Paths without the
/// configuration suffix are returned unchanged.
pub fn base_path(root_path: &str) -> &str {
    match root_path.strip_suffix(CONFIG_SUFFIX) {
        Some("") => "/",
        Some(base) => base,
        None => root_path,
    }
}

/// Check if a path names a temporary/transient file (editor artifacts,
/// half-written publish output). Such paths must never reach the cache.
pub fn is_temp_file(root_path: &str) -> bool {
    let name = paths::file_name(root_path);
    if name.starts_with('~') || name.ends_with('~') {
        return true;
    }
    matches!(
        name.rsplit_once('.').map(|(_, ext)| ext),
        Some("tmp" | "swp" | "bak")
    )
}
