//! Tests for process-wide initialization and manifest generation.

use std::fs;
use std::sync::Arc;

use horizon_recast::prelude::*;
use horizon_recast::{RecastError, init_from_file};

#[test]
fn test_init_configures_global_tracker() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recast.toml");
    fs::write(
        &path,
        "rebuild_policy = \"never\"\nwarn_on_unexpected_transition = false\nlog_filter = \"horizon_recast=debug\"\n",
    )
    .unwrap();

    let tracker = init_from_file(&path).unwrap();
    assert!(Arc::ptr_eq(tracker, WindowTracker::global()));
    assert_eq!(tracker.config().rebuild_policy, RebuildPolicy::Never);
    assert!(!tracker.config().warn_on_unexpected_transition);

    let missing = init_from_file(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(missing, RecastError::Config(_)));
}

#[test]
fn test_manifests_from_listing() {
    let names = ResourceTable::builder("app")
        .entry(ResourceId(0x7f0b0000), ResourceType::Id, "title")
        .entry(ResourceId(0x7f0b0001), ResourceType::Id, "subtitle")
        .entry(ResourceId(0x7f0c0000), ResourceType::String, "app_name")
        .build();
    let class = IdClass::from_r_txt(
        "int id title 0x7f0b0000\nint id subtitle 0x7f0b0001\nint string app_name 0x7f0c0000\n",
    )
    .unwrap();
    let builder = ManifestBuilder::new(&names);

    let ids = builder.build_ids(&class).unwrap();
    assert!(ids.contains(r#"<item type="id" name="title"/>"#));
    assert!(ids.contains(r#"<item type="id" name="subtitle"/>"#));
    assert!(!ids.contains("app_name"));

    let public = builder.build_public(&class).unwrap();
    let id_pos = public.find(r#"name="subtitle" id="0x7f0b0001""#).unwrap();
    let string_pos = public.find(r#"name="app_name" id="0x7f0c0000""#).unwrap();
    assert!(id_pos < string_pos);
}
