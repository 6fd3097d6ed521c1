//! Resource id manifests for Horizon Recast.
//!
//! A replacement resource bundle can only stand in for an application's own
//! resources if it is compiled against the same ids. This crate writes the
//! two manifests a resource compiler needs for that: an `ids.xml` declaring
//! every id entry, and a `public.xml` pinning every name to its id.
//!
//! # Example
//!
//! ```
//! use horizon_recast_context::{ResourceId, ResourceTable, ResourceType};
//! use horizon_recast_idgen::{IdClass, ManifestBuilder};
//!
//! let names = ResourceTable::builder("app")
//!     .entry(ResourceId(0x7f0b0000), ResourceType::Id, "title")
//!     .build();
//! let class = IdClass::from_r_txt("int id title 0x7f0b0000\n").unwrap();
//!
//! let public = ManifestBuilder::new(&names).build_public(&class).unwrap();
//! assert!(public.contains(r#"<public type="id" name="title" id="0x7f0b0000"/>"#));
//! ```

mod error;
pub mod id_class;
pub mod manifest;

pub use error::{IdGenError, Result};
pub use id_class::IdClass;
pub use manifest::ManifestBuilder;
