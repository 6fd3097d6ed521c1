//! Id and public-surface manifests.
//!
//! Both manifests list every id in the contiguous range spanned by a group's
//! application ids, resolving each through a [`Resources`] name resolver:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <resources>
//!   <public type="id" name="title" id="0x7f0b0000"/>
//! </resources>
//! ```

use std::ops::RangeInclusive;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use horizon_recast_context::resources::ResourceEntry;
use horizon_recast_context::{ResourceId, ResourceType, Resources};
use horizon_recast_core::logging::targets;

use crate::error::{IdGenError, Result};
use crate::id_class::IdClass;

/// Builds XML manifests for an [`IdClass`].
pub struct ManifestBuilder<'a> {
    resources: &'a dyn Resources,
}

impl<'a> ManifestBuilder<'a> {
    /// Create a builder that names ids through `resources`.
    pub fn new(resources: &'a dyn Resources) -> Self {
        Self { resources }
    }

    /// An `<item>` manifest covering the `id` group.
    ///
    /// A class without an `id` group yields an empty `<resources>` element.
    pub fn build_ids(&self, class: &IdClass) -> Result<String> {
        let mut writer = ManifestWriter::new()?;
        if let Some(range) = class.group(ResourceType::Id).and_then(app_range) {
            for raw in range {
                let entry = self.resolve(raw)?;
                let mut item = BytesStart::new("item");
                item.push_attribute(("type", entry.kind.as_str()));
                item.push_attribute(("name", entry.name.as_str()));
                writer.empty(item)?;
            }
        }
        let xml = writer.finish()?;
        tracing::debug!(target: targets::IDGEN, resolver = self.resources.label(), bytes = xml.len(), "built id manifest");
        Ok(xml)
    }

    /// A `<public>` manifest covering every public type in manifest order.
    ///
    /// Groups missing from the class are skipped.
    pub fn build_public(&self, class: &IdClass) -> Result<String> {
        let mut writer = ManifestWriter::new()?;
        for kind in ResourceType::PUBLIC_ORDER {
            let Some(range) = class.group(kind).and_then(app_range) else {
                continue;
            };
            for raw in range {
                let entry = self.resolve(raw)?;
                let id = format!("0x{raw:x}");
                let mut public = BytesStart::new("public");
                public.push_attribute(("type", entry.kind.as_str()));
                public.push_attribute(("name", entry.name.as_str()));
                public.push_attribute(("id", id.as_str()));
                writer.empty(public)?;
            }
        }
        let xml = writer.finish()?;
        tracing::debug!(target: targets::IDGEN, resolver = self.resources.label(), bytes = xml.len(), "built public manifest");
        Ok(xml)
    }

    fn resolve(&self, raw: u32) -> Result<ResourceEntry> {
        let id = ResourceId(raw);
        self.resources
            .entry(id)
            .ok_or(IdGenError::UnknownResource(id))
    }
}

/// The span from the smallest to the largest application id in `ids`.
fn app_range(ids: &[ResourceId]) -> Option<RangeInclusive<u32>> {
    let mut app = ids.iter().filter(|id| id.is_app()).map(|id| id.get());
    let first = app.next()?;
    let (start, end) = app.fold((first, first), |(lo, hi), id| (lo.min(id), hi.max(id)));
    Some(start..=end)
}

struct ManifestWriter {
    writer: Writer<Vec<u8>>,
}

impl ManifestWriter {
    fn new() -> Result<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("resources")))?;
        Ok(Self { writer })
    }

    fn empty(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    fn finish(mut self) -> Result<String> {
        self.writer.write_event(Event::End(BytesEnd::new("resources")))?;
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_recast_context::ResourceTable;
    use quick_xml::Reader;

    fn resolver() -> ResourceTable {
        ResourceTable::builder("app")
            .entry(ResourceId(0x7f010000), ResourceType::Attr, "accent")
            .entry(ResourceId(0x7f0b0000), ResourceType::Id, "title")
            .entry(ResourceId(0x7f0b0001), ResourceType::Id, "subtitle")
            .entry(ResourceId(0x7f0b0002), ResourceType::Id, "icon")
            .entry(ResourceId(0x7f0c0000), ResourceType::String, "app_name")
            .build()
    }

    /// `(element, type, name, id)` for every entry in a manifest.
    fn entries(xml: &str) -> Vec<(String, String, String, Option<String>)> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        let mut out = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Empty(e) => {
                    let attr = |key: &str| {
                        e.try_get_attribute(key)
                            .unwrap()
                            .map(|a| a.unescape_value().unwrap().into_owned())
                    };
                    out.push((
                        String::from_utf8(e.name().as_ref().to_vec()).unwrap(),
                        attr("type").unwrap(),
                        attr("name").unwrap(),
                        attr("id"),
                    ));
                }
                Event::Eof => break,
                _ => {}
            }
        }
        out
    }

    #[test]
    fn ids_cover_contiguous_range() {
        let table = resolver();
        // gaps inside the range are still listed
        let class = IdClass::new().with_group(
            ResourceType::Id,
            [ResourceId(0x7f0b0002), ResourceId(0x7f0b0000), ResourceId(0x0102_0000)],
        );

        let xml = ManifestBuilder::new(&table).build_ids(&class).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));

        let names: Vec<_> = entries(&xml).into_iter().map(|(el, _, name, _)| (el, name)).collect();
        assert_eq!(
            names,
            vec![
                ("item".to_string(), "title".to_string()),
                ("item".to_string(), "subtitle".to_string()),
                ("item".to_string(), "icon".to_string()),
            ]
        );
    }

    #[test]
    fn public_follows_type_order() {
        let table = resolver();
        let class = IdClass::new()
            .with_group(ResourceType::String, [ResourceId(0x7f0c0000)])
            .with_group(ResourceType::Id, [ResourceId(0x7f0b0000)])
            .with_group(ResourceType::Attr, [ResourceId(0x7f010000)]);

        let xml = ManifestBuilder::new(&table).build_public(&class).unwrap();
        let listed = entries(&xml);
        let types: Vec<_> = listed.iter().map(|(_, kind, _, _)| kind.as_str()).collect();
        assert_eq!(types, vec!["attr", "id", "string"]);
        assert_eq!(listed[1].3.as_deref(), Some("0x7f0b0000"));
        assert!(listed.iter().all(|(el, ..)| el == "public"));
    }

    #[test]
    fn empty_class_yields_empty_manifest() {
        let table = resolver();
        let xml = ManifestBuilder::new(&table).build_public(&IdClass::new()).unwrap();
        assert!(xml.contains("<resources>"));
        assert!(entries(&xml).is_empty());
    }

    #[test]
    fn unnamed_id_in_range_fails() {
        let table = resolver();
        let class = IdClass::new().with_group(ResourceType::Id, [ResourceId(0x7f0b0000), ResourceId(0x7f0b0005)]);

        let err = ManifestBuilder::new(&table).build_ids(&class).unwrap_err();
        assert!(matches!(err, IdGenError::UnknownResource(ResourceId(0x7f0b0003))));
    }
}
