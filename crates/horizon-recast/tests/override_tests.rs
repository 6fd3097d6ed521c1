//! Tests for the resource-override facade as seen by a host window.

use std::sync::Arc;

use horizon_recast::prelude::*;

const TITLE: ResourceId = ResourceId::app(0x0c, 0);
const ACCENT: ResourceId = ResourceId::app(0x01, 0);
const APP_THEME: ResourceId = ResourceId::app(0x03, 0);

fn bundle(label: &str, title: &str, accent: u32) -> SharedResources {
    ResourceTable::builder(label)
        .value(TITLE, ResourceType::String, "title", title)
        .style(APP_THEME, "AppTheme", Style::new().with(ACCENT, ResourceValue::Color(accent)))
        .asset("fonts/title.txt", title.as_bytes().to_vec())
        .build()
        .into_shared()
}

fn themed_window(host: SharedResources) -> Arc<HeadlessWindow> {
    HeadlessWindow::new(Arc::new(HostContext::new(host).with_theme_style(APP_THEME)))
}

fn title_of(window: &dyn Window) -> Option<ResourceValue> {
    window.context_slot()?.resources().value(TITLE)
}

#[test]
fn test_window_sees_override_and_reset() {
    let window = themed_window(bundle("host", "Host", 0xff000000));
    assert_eq!(title_of(window.as_ref()), Some(ResourceValue::from("Host")));

    OverrideContext::apply(window.as_ref(), Some(bundle("r1", "One", 0xff00ff00))).unwrap();
    let slot = window.context_slot().unwrap();
    assert_eq!(title_of(window.as_ref()), Some(ResourceValue::from("One")));
    assert_eq!(slot.assets().open("fonts/title.txt").as_deref(), Some(&b"One"[..]));
    assert_eq!(slot.theme().resolve(ACCENT), Some(ResourceValue::Color(0xff00ff00)));

    OverrideContext::reset(window.as_ref()).unwrap();
    assert_eq!(title_of(window.as_ref()), Some(ResourceValue::from("Host")));
    assert_eq!(slot.assets().open("fonts/title.txt").as_deref(), Some(&b"Host"[..]));
    assert_eq!(slot.theme().resolve(ACCENT), Some(ResourceValue::Color(0xff000000)));
}

#[test]
fn test_identical_override_is_idempotent() {
    for resolved_first in [false, true] {
        let window = themed_window(bundle("host", "Host", 0));
        if resolved_first {
            assert_eq!(title_of(window.as_ref()), Some(ResourceValue::from("Host")));
        }
        let r1 = bundle("r1", "One", 1);

        let facade = OverrideContext::apply(window.as_ref(), Some(r1.clone())).unwrap();
        assert!(!facade.requires_rebuild(), "resolved first: {resolved_first}");
        OverrideContext::apply(window.as_ref(), Some(r1)).unwrap();
        assert!(!facade.requires_rebuild(), "resolved first: {resolved_first}");
        assert_eq!(title_of(window.as_ref()), Some(ResourceValue::from("One")));
    }
}

#[test]
fn test_identity_change_always_requests_rebuild() {
    let sets = [
        None,
        Some(bundle("r1", "One", 1)),
        Some(bundle("r2", "Two", 2)),
        None,
    ];
    for (i, first) in sets.iter().enumerate() {
        for (j, second) in sets.iter().enumerate() {
            if same_resources(first.as_ref(), second.as_ref()) {
                continue;
            }
            let window = themed_window(bundle("host", "Host", 0));
            let facade = OverrideContext::apply(window.as_ref(), first.clone()).unwrap();
            facade.take_rebuild_request();

            OverrideContext::apply(window.as_ref(), second.clone()).unwrap();
            assert!(facade.requires_rebuild(), "{i} -> {j}");
        }
    }
}

#[test]
fn test_first_override_after_inflation_stays_clean() {
    let window = themed_window(bundle("host", "Host", 0));
    // the window has already inflated content from its host resources
    title_of(window.as_ref());

    let facade = OverrideContext::apply(window.as_ref(), Some(bundle("r1", "One", 1))).unwrap();
    assert!(!facade.requires_rebuild());
    assert_eq!(title_of(window.as_ref()), Some(ResourceValue::from("One")));

    OverrideContext::apply(window.as_ref(), Some(bundle("r2", "Two", 2))).unwrap();
    assert!(facade.requires_rebuild());
}

#[test]
fn test_borrowed_facade_is_rejected() {
    let owner = themed_window(bundle("host", "Host", 0));
    let facade = OverrideContext::apply(owner.as_ref(), Some(bundle("r1", "One", 1))).unwrap();

    let borrower = HeadlessWindow::new(facade.clone());
    let err = OverrideContext::apply(borrower.as_ref(), Some(bundle("r2", "Two", 2))).unwrap_err();
    assert_eq!(err.window, borrower.id());
    assert_eq!(title_of(owner.as_ref()), Some(ResourceValue::from("One")));
}
