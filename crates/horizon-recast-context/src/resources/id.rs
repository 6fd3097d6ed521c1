//! Resource identifiers and type categories.

use std::fmt;
use std::str::FromStr;

/// A packed numeric resource identifier.
///
/// The layout is `0xPPTTEEEE`: package byte, type byte, entry index.
/// Application resources live in package `0x7f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// Package bits shared by every application resource.
    pub const APP_PACKAGE: u32 = 0x7f00_0000;

    /// Build an application resource id from a type index and entry index.
    pub const fn app(type_index: u8, entry: u16) -> Self {
        Self(Self::APP_PACKAGE | ((type_index as u32) << 16) | entry as u32)
    }

    /// The raw id.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this id belongs to the application package.
    #[inline]
    pub const fn is_app(self) -> bool {
        self.0 & Self::APP_PACKAGE == Self::APP_PACKAGE
    }

    /// The package byte.
    #[inline]
    pub const fn package(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The type byte.
    #[inline]
    pub const fn type_index(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// The entry index within its type.
    #[inline]
    pub const fn entry_index(self) -> u16 {
        self.0 as u16
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl From<u32> for ResourceId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// A resource type category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    Attr,
    Id,
    Style,
    String,
    Dimen,
    Color,
    Array,
    Drawable,
    Layout,
    Anim,
    Integer,
    Animator,
    Interpolator,
    Transition,
    Raw,
    Bool,
    Menu,
    Mipmap,
    Xml,
}

impl ResourceType {
    /// Categories listed in a public-surface manifest, in manifest order.
    pub const PUBLIC_ORDER: [ResourceType; 15] = [
        ResourceType::Attr,
        ResourceType::Id,
        ResourceType::Style,
        ResourceType::String,
        ResourceType::Dimen,
        ResourceType::Color,
        ResourceType::Array,
        ResourceType::Drawable,
        ResourceType::Layout,
        ResourceType::Anim,
        ResourceType::Integer,
        ResourceType::Animator,
        ResourceType::Interpolator,
        ResourceType::Transition,
        ResourceType::Raw,
    ];

    /// The lowercase name used in resource manifests.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attr => "attr",
            Self::Id => "id",
            Self::Style => "style",
            Self::String => "string",
            Self::Dimen => "dimen",
            Self::Color => "color",
            Self::Array => "array",
            Self::Drawable => "drawable",
            Self::Layout => "layout",
            Self::Anim => "anim",
            Self::Integer => "integer",
            Self::Animator => "animator",
            Self::Interpolator => "interpolator",
            Self::Transition => "transition",
            Self::Raw => "raw",
            Self::Bool => "bool",
            Self::Menu => "menu",
            Self::Mipmap => "mipmap",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown resource type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource type '{0}'")]
pub struct UnknownResourceType(pub String);

impl FromStr for ResourceType {
    type Err = UnknownResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "attr" => Self::Attr,
            "id" => Self::Id,
            "style" => Self::Style,
            "string" => Self::String,
            "dimen" => Self::Dimen,
            "color" => Self::Color,
            "array" => Self::Array,
            "drawable" => Self::Drawable,
            "layout" => Self::Layout,
            "anim" => Self::Anim,
            "integer" => Self::Integer,
            "animator" => Self::Animator,
            "interpolator" => Self::Interpolator,
            "transition" => Self::Transition,
            "raw" => Self::Raw,
            "bool" => Self::Bool,
            "menu" => Self::Menu,
            "mipmap" => Self::Mipmap,
            "xml" => Self::Xml,
            other => return Err(UnknownResourceType(other.to_string())),
        })
    }
}

/// The type and entry name a resource id resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceEntry {
    /// Type category.
    pub kind: ResourceType,
    /// Entry name, e.g. `title` for `R.id.title`.
    pub name: String,
}

impl ResourceEntry {
    /// Create an entry.
    pub fn new(kind: ResourceType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}
