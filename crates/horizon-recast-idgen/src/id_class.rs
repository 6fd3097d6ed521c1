//! Generated id groups.
//!
//! An [`IdClass`] is what a resource compiler emits for an application: one
//! group of integer ids per resource type. It can be assembled by hand or
//! read from an `R.txt` listing:
//!
//! ```text
//! int id title 0x7f0b0000
//! int string app_name 0x7f0c0000
//! int[] styleable Toolbar { 0x7f010000, 0x7f010001 }
//! ```

use std::collections::HashMap;
use std::path::Path;

use horizon_recast_context::{ResourceId, ResourceType};
use horizon_recast_core::logging::targets;

use crate::error::{IdGenError, Result};

/// Resource ids grouped by type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdClass {
    groups: HashMap<ResourceType, Vec<ResourceId>>,
}

impl IdClass {
    /// Create an empty class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, replacing any previous group of the same type.
    pub fn with_group(mut self, kind: ResourceType, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.groups.insert(kind, ids.into_iter().collect());
        self
    }

    /// Add one id to its group, creating the group if needed.
    pub fn insert(&mut self, kind: ResourceType, id: ResourceId) {
        self.groups.entry(kind).or_default().push(id);
    }

    /// The ids of one group, `None` if the group does not exist.
    pub fn group(&self, kind: ResourceType) -> Option<&[ResourceId]> {
        self.groups.get(&kind).map(Vec::as_slice)
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Parse an `R.txt` listing.
    ///
    /// Styleable entries are skipped; they never appear in manifests.
    pub fn from_r_txt(source: &str) -> Result<Self> {
        let mut class = Self::new();
        for (index, line) in source.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (Some(decl), Some(kind), Some(_name), Some(value)) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                return Err(IdGenError::parse(line_no, "expected '<decl> <type> <name> <value>'"));
            };

            if decl == "int[]" || kind == "styleable" {
                continue;
            }
            if decl != "int" {
                return Err(IdGenError::parse(line_no, format!("unsupported declaration '{decl}'")));
            }

            let kind = kind
                .parse::<ResourceType>()
                .map_err(|e| IdGenError::parse(line_no, e.to_string()))?;
            let raw = value
                .strip_prefix("0x")
                .ok_or_else(|| IdGenError::parse(line_no, format!("expected hex id, found '{value}'")))?;
            let id = u32::from_str_radix(raw, 16)
                .map_err(|e| IdGenError::parse(line_no, format!("invalid id '{value}': {e}")))?;

            class.insert(kind, ResourceId(id));
        }

        tracing::debug!(target: targets::IDGEN, groups = class.group_count(), "parsed id listing");
        Ok(class)
    }

    /// Read and parse an `R.txt` file.
    pub fn from_r_txt_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| IdGenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_r_txt(&source)
    }
}
