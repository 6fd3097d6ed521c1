//! In-memory resource sets.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::id::{ResourceEntry, ResourceId, ResourceType};
use super::theme::Style;
use super::value::ResourceValue;
use super::{Assets, Resources, SharedAssets, SharedResources};

/// An in-memory asset store.
#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    files: BTreeMap<String, Arc<[u8]>>,
}

impl AssetTable {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.files.insert(path.into(), bytes.into());
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the store has no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Assets for AssetTable {
    fn open(&self, path: &str) -> Option<Arc<[u8]>> {
        self.files.get(path).cloned()
    }

    fn list(&self, dir: &str) -> Vec<String> {
        let prefix = if dir.is_empty() || dir.ends_with('/') {
            dir.to_string()
        } else {
            format!("{dir}/")
        };
        self.files
            .keys()
            .filter_map(|path| path.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(|rest| format!("{prefix}{rest}"))
            .collect()
    }
}

#[derive(Debug, Clone)]
struct TableEntry {
    entry: ResourceEntry,
    value: Option<ResourceValue>,
}

/// A resource set held entirely in memory.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_recast_context::resources::{
///     ResourceId, ResourceTable, ResourceType, ResourceValue, Resources,
/// };
///
/// let title = ResourceId::app(0x0b, 0);
/// let table = ResourceTable::builder("bundle-1")
///     .value(title, ResourceType::String, "title", "Hello")
///     .asset("fonts/body.ttf", vec![0u8; 4])
///     .build();
///
/// assert_eq!(table.value(title), Some(ResourceValue::from("Hello")));
/// assert!(table.assets().open("fonts/body.ttf").is_some());
/// ```
#[derive(Debug)]
pub struct ResourceTable {
    label: String,
    entries: HashMap<ResourceId, TableEntry>,
    styles: HashMap<ResourceId, Style>,
    assets: Arc<AssetTable>,
}

impl ResourceTable {
    /// Start building a table.
    pub fn builder(label: impl Into<String>) -> ResourceTableBuilder {
        ResourceTableBuilder {
            label: label.into(),
            entries: HashMap::new(),
            styles: HashMap::new(),
            assets: AssetTable::new(),
        }
    }

    /// Number of named entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no named entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wrap this table as a shared resource set.
    pub fn into_shared(self) -> SharedResources {
        Arc::new(self)
    }
}

impl Resources for ResourceTable {
    fn label(&self) -> &str {
        &self.label
    }

    fn assets(&self) -> SharedAssets {
        self.assets.clone()
    }

    fn entry(&self, id: ResourceId) -> Option<ResourceEntry> {
        self.entries.get(&id).map(|e| e.entry.clone())
    }

    fn value(&self, id: ResourceId) -> Option<ResourceValue> {
        self.entries.get(&id).and_then(|e| e.value.clone())
    }

    fn style(&self, id: ResourceId) -> Option<&Style> {
        self.styles.get(&id)
    }
}

/// Builder for [`ResourceTable`].
#[derive(Debug)]
pub struct ResourceTableBuilder {
    label: String,
    entries: HashMap<ResourceId, TableEntry>,
    styles: HashMap<ResourceId, Style>,
    assets: AssetTable,
}

impl ResourceTableBuilder {
    /// Declare a named entry without a value (ids, attrs, layouts).
    pub fn entry(mut self, id: ResourceId, kind: ResourceType, name: impl Into<String>) -> Self {
        self.entries.insert(
            id,
            TableEntry {
                entry: ResourceEntry::new(kind, name),
                value: None,
            },
        );
        self
    }

    /// Declare a named entry with a value.
    pub fn value(
        mut self,
        id: ResourceId,
        kind: ResourceType,
        name: impl Into<String>,
        value: impl Into<ResourceValue>,
    ) -> Self {
        self.entries.insert(
            id,
            TableEntry {
                entry: ResourceEntry::new(kind, name),
                value: Some(value.into()),
            },
        );
        self
    }

    /// Declare a style.
    pub fn style(mut self, id: ResourceId, name: impl Into<String>, style: Style) -> Self {
        self.styles.insert(id, style);
        self.entry(id, ResourceType::Style, name)
    }

    /// Bundle an asset file.
    pub fn asset(mut self, path: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.assets.insert(path, bytes);
        self
    }

    /// Finish the table.
    pub fn build(self) -> ResourceTable {
        ResourceTable {
            label: self.label,
            entries: self.entries,
            styles: self.styles,
            assets: Arc::new(self.assets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_and_values() {
        let id = ResourceId::app(0x08, 0);
        let title = ResourceId::app(0x0b, 1);
        let table = ResourceTable::builder("t")
            .entry(id, ResourceType::Id, "title")
            .value(title, ResourceType::String, "app_name", "Recast")
            .build();

        assert_eq!(table.len(), 2);
        assert_eq!(table.entry(id), Some(ResourceEntry::new(ResourceType::Id, "title")));
        assert_eq!(table.value(id), None);
        assert_eq!(table.value(title).as_ref().and_then(|v| v.as_str()), Some("Recast"));
        assert_eq!(table.entry(ResourceId::app(0x08, 9)), None);
    }

    #[test]
    fn style_registers_entry() {
        let id = ResourceId::app(0x0c, 0);
        let table = ResourceTable::builder("t").style(id, "AppTheme", Style::new()).build();
        assert!(table.style(id).is_some());
        assert_eq!(table.entry(id).map(|e| e.kind), Some(ResourceType::Style));
    }

    #[test]
    fn asset_listing_is_one_level() {
        let mut assets = AssetTable::new();
        assets.insert("fonts/a.ttf", vec![1u8]);
        assets.insert("fonts/b.ttf", vec![2u8]);
        assets.insert("fonts/extra/c.ttf", vec![3u8]);
        assets.insert("readme.txt", vec![4u8]);

        assert_eq!(assets.list("fonts"), vec!["fonts/a.ttf", "fonts/b.ttf"]);
        assert_eq!(assets.list(""), vec!["readme.txt"]);
        assert_eq!(assets.open("fonts/b.ttf").as_deref(), Some(&[2u8][..]));
        assert!(assets.open("missing").is_none());
    }
}
