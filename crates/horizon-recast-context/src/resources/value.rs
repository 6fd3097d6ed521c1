//! Resolved resource values.

use super::id::ResourceId;

/// A value a resource id or theme attribute resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceValue {
    /// A string resource.
    String(String),
    /// An ARGB color.
    Color(u32),
    /// A dimension in density-independent pixels.
    Dimension(f32),
    /// An integer resource.
    Integer(i64),
    /// A boolean resource.
    Boolean(bool),
    /// A reference to another resource, resolved by the caller.
    Reference(ResourceId),
}

impl ResourceValue {
    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The color payload, if this is a color.
    pub fn as_color(&self) -> Option<u32> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// The referenced id, if this is a reference.
    pub fn as_reference(&self) -> Option<ResourceId> {
        match self {
            Self::Reference(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<&str> for ResourceValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ResourceValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for ResourceValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for ResourceValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}
