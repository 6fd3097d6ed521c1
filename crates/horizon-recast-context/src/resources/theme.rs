//! Styles and themes.
//!
//! A [`Theme`] is an ordered stack of applied style ids resolved against one
//! resource set. Copying a theme's stack onto a theme bound to another
//! resource set with [`Theme::set_to`] re-resolves the same styles through the
//! new set, which is how an overridden window keeps its look while picking up
//! new values.

use std::collections::HashMap;
use std::fmt;

use super::id::ResourceId;
use super::value::ResourceValue;
use super::{SharedResources, identity};

/// Maximum parent chain length followed when resolving a style attribute.
const MAX_STYLE_DEPTH: usize = 32;

/// A named set of attribute values, optionally inheriting from a parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    parent: Option<ResourceId>,
    attributes: HashMap<ResourceId, ResourceValue>,
}

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inherit unset attributes from `parent`.
    pub fn with_parent(mut self, parent: ResourceId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set an attribute.
    pub fn with(mut self, attr: ResourceId, value: impl Into<ResourceValue>) -> Self {
        self.attributes.insert(attr, value.into());
        self
    }

    /// The parent style, if any.
    pub fn parent(&self) -> Option<ResourceId> {
        self.parent
    }

    /// The value this style itself defines for `attr`.
    pub fn get(&self, attr: ResourceId) -> Option<&ResourceValue> {
        self.attributes.get(&attr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AppliedStyle {
    style: ResourceId,
    force: bool,
}

/// A stack of applied styles bound to one resource set.
#[derive(Clone)]
pub struct Theme {
    resources: SharedResources,
    applied: Vec<AppliedStyle>,
}

impl Theme {
    /// Create an empty theme bound to `resources`.
    pub fn new(resources: SharedResources) -> Self {
        Self {
            resources,
            applied: Vec::new(),
        }
    }

    /// Create a theme bound to `resources` carrying `base`'s applied styles.
    pub fn derived(resources: SharedResources, base: &Theme) -> Self {
        let mut theme = Self::new(resources);
        theme.set_to(base);
        theme
    }

    /// The resource set this theme resolves against.
    pub fn resources(&self) -> &SharedResources {
        &self.resources
    }

    /// Apply a style on top of the stack.
    ///
    /// With `force`, its attributes replace values set by earlier styles;
    /// otherwise it only fills attributes nothing has set yet.
    pub fn apply_style(&mut self, style: ResourceId, force: bool) {
        self.applied.push(AppliedStyle { style, force });
    }

    /// Replace this theme's style stack with a copy of `other`'s.
    ///
    /// The resource set binding is kept.
    pub fn set_to(&mut self, other: &Theme) {
        self.applied.clone_from(&other.applied);
    }

    /// Applied style ids, oldest first.
    pub fn applied_styles(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.applied.iter().map(|a| a.style)
    }

    /// Resolve a theme attribute through the applied styles.
    pub fn resolve(&self, attr: ResourceId) -> Option<ResourceValue> {
        let mut resolved = None;
        for applied in &self.applied {
            if resolved.is_some() && !applied.force {
                continue;
            }
            if let Some(value) = self.lookup(applied.style, attr) {
                resolved = Some(value);
            }
        }
        resolved
    }

    fn lookup(&self, style: ResourceId, attr: ResourceId) -> Option<ResourceValue> {
        let mut current = Some(style);
        for _ in 0..MAX_STYLE_DEPTH {
            let style = self.resources.style(current?)?;
            if let Some(value) = style.get(attr) {
                return Some(value.clone());
            }
            current = style.parent();
        }
        tracing::warn!(
            target: horizon_recast_core::logging::targets::OVERRIDE,
            %style,
            "style parent chain too deep, giving up"
        );
        None
    }
}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theme")
            .field("resources", &self.resources.label())
            .field("resources_id", &format_args!("{:#x}", identity(&self.resources)))
            .field("applied", &self.applied)
            .finish()
    }
}
