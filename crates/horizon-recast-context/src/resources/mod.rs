//! The resource resolution contract.
//!
//! A *resource set* is anything implementing [`Resources`]: it resolves
//! numeric ids to values, names and styles, exposes an [`Assets`] store, and
//! is the seed for [`Theme`]s. Resource sets are shared as
//! [`SharedResources`] and compared by identity: two sets are "the same" only
//! if they are the same allocation, never by content.

mod id;
mod table;
mod theme;
mod value;

use std::sync::Arc;

pub use id::{ResourceEntry, ResourceId, ResourceType, UnknownResourceType};
pub use table::{AssetTable, ResourceTable, ResourceTableBuilder};
pub use theme::{Style, Theme};
pub use value::ResourceValue;

/// A shared, swappable resource set.
pub type SharedResources = Arc<dyn Resources>;

/// A shared asset store.
pub type SharedAssets = Arc<dyn Assets>;

/// Raw asset lookup by path.
pub trait Assets: Send + Sync {
    /// Read the asset at `path`.
    fn open(&self, path: &str) -> Option<Arc<[u8]>>;

    /// Paths of all assets directly under `dir` (use `""` for the root).
    fn list(&self, dir: &str) -> Vec<String>;
}

/// A resolver for one resource set.
pub trait Resources: Send + Sync {
    /// Human-readable name used in logs.
    fn label(&self) -> &str;

    /// The asset store bundled with this resource set.
    fn assets(&self) -> SharedAssets;

    /// Type and entry name for `id`.
    fn entry(&self, id: ResourceId) -> Option<ResourceEntry>;

    /// The value `id` resolves to.
    fn value(&self, id: ResourceId) -> Option<ResourceValue>;

    /// The style definition for `id`.
    fn style(&self, id: ResourceId) -> Option<&Style>;
}

/// Identity key of a resource set.
#[inline]
pub fn identity(resources: &SharedResources) -> usize {
    Arc::as_ptr(resources) as *const () as usize
}

/// Whether two optional resource sets are the same set (or both absent).
pub fn same_resources(a: Option<&SharedResources>, b: Option<&SharedResources>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => identity(a) == identity(b),
        _ => false,
    }
}

pub(crate) fn describe(resources: Option<&SharedResources>) -> &str {
    resources.map_or("<host default>", |r| r.label())
}
