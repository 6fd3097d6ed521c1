//! The resource-override facade.
//!
//! [`OverrideContext`] sits in a window's [`ContextSlot`] and answers asset,
//! resource and theme lookups from a swappable delegate resource set, falling
//! back to the host-bound base context when no delegate is set. It is
//! installed once per window and re-targeted in place afterwards, because the
//! window keeps resolving through the same slot for its whole life.
//!
//! Every change of delegate identity marks the window as needing a rebuild:
//! anything inflated before the change still shows the old resources.
//!
//! ```
//! use std::sync::Arc;
//! use horizon_recast_context::prelude::*;
//!
//! let host = ResourceTable::builder("host").build().into_shared();
//! let window = HeadlessWindow::with_resources(host);
//!
//! let bundle = ResourceTable::builder("bundle-1").build().into_shared();
//! let facade = OverrideContext::apply(window.as_ref(), Some(bundle.clone())).unwrap();
//! assert!(same_resources(facade.delegate().as_ref(), Some(&bundle)));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use horizon_recast_core::logging::targets;

use crate::context::{Context, ContextSlot};
use crate::error::{IntegrityError, IntegrityReason};
use crate::resources::{SharedAssets, SharedResources, Theme, describe, same_resources};
use crate::window::{Window, WindowId};

struct OverrideState {
    resources: Option<SharedResources>,
    theme: Option<Theme>,
    rebuild_pending: bool,
}

/// A context whose lookups go through a swappable delegate resource set.
pub struct OverrideContext {
    window: WindowId,
    base: Arc<dyn Context>,
    state: Mutex<OverrideState>,
}

static_assertions::assert_impl_all!(OverrideContext: Send, Sync);

impl OverrideContext {
    fn new(window: WindowId, base: Arc<dyn Context>, resources: Option<SharedResources>) -> Self {
        Self {
            window,
            base,
            state: Mutex::new(OverrideState {
                resources,
                theme: None,
                rebuild_pending: false,
            }),
        }
    }

    /// Point `window`'s lookups at `resources`, or back at the host defaults
    /// with `None`.
    ///
    /// Installs a facade into the window's context slot the first time and
    /// re-targets the installed one afterwards. Either way the slot's memoized
    /// lookups are dropped. Changing the delegate's identity clears the cached
    /// theme and marks the window for rebuild; passing the current delegate
    /// again changes nothing.
    ///
    /// A freshly installed facade never marks a rebuild, so applying the same
    /// set twice leaves the window clean.
    ///
    /// # Errors
    ///
    /// [`IntegrityError`] if the window has no context slot or its base
    /// context is another window's facade. The window is left untouched.
    pub fn apply(
        window: &dyn Window,
        resources: Option<SharedResources>,
    ) -> Result<Arc<Self>, IntegrityError> {
        let id = window.id();
        let slot = window
            .context_slot()
            .ok_or(IntegrityError::new(id, IntegrityReason::MissingSlot))?;

        if slot.override_context().is_none() && slot.base().as_override().is_some() {
            return Err(IntegrityError::new(id, IntegrityReason::ForeignFacade));
        }

        let (facade, installed) = slot.install_with(|| {
            Arc::new(Self::new(id, slot.base().clone(), resources.clone()))
        });

        if installed {
            tracing::debug!(
                target: targets::OVERRIDE,
                window = %id,
                resources = describe(resources.as_ref()),
                "installed override facade"
            );
        } else {
            facade.set_resources(resources);
        }

        slot.invalidate();
        Ok(facade)
    }

    /// Restore host-default resolution for `window`.
    ///
    /// Same as [`apply`](Self::apply) with `None`.
    pub fn reset(window: &dyn Window) -> Result<Arc<Self>, IntegrityError> {
        Self::apply(window, None)
    }

    /// The facade installed in `slot`, if any.
    pub fn installed_in(slot: &ContextSlot) -> Option<Arc<Self>> {
        slot.override_context()
    }

    /// Replace the delegate. Returns whether its identity changed.
    fn set_resources(&self, resources: Option<SharedResources>) -> bool {
        let mut state = self.state.lock();
        if same_resources(state.resources.as_ref(), resources.as_ref()) {
            tracing::trace!(
                target: targets::OVERRIDE,
                window = %self.window,
                "override unchanged"
            );
            return false;
        }

        tracing::debug!(
            target: targets::OVERRIDE,
            window = %self.window,
            from = describe(state.resources.as_ref()),
            to = describe(resources.as_ref()),
            "override re-targeted, rebuild required"
        );
        state.resources = resources;
        state.theme = None;
        state.rebuild_pending = true;
        true
    }

    /// The window this facade belongs to.
    pub fn window(&self) -> WindowId {
        self.window
    }

    /// The host-bound context this facade falls back to.
    pub fn base(&self) -> &Arc<dyn Context> {
        &self.base
    }

    /// The current delegate, `None` meaning host defaults.
    pub fn delegate(&self) -> Option<SharedResources> {
        self.state.lock().resources.clone()
    }

    /// Whether the window must be rebuilt to fully show its current resources.
    pub fn requires_rebuild(&self) -> bool {
        self.state.lock().rebuild_pending
    }

    /// Read and clear the rebuild flag.
    pub fn take_rebuild_request(&self) -> bool {
        std::mem::take(&mut self.state.lock().rebuild_pending)
    }
}

impl Context for OverrideContext {
    fn assets(&self) -> SharedAssets {
        match self.delegate() {
            Some(resources) => resources.assets(),
            None => self.base.assets(),
        }
    }

    fn resources(&self) -> SharedResources {
        match self.delegate() {
            Some(resources) => resources,
            None => self.base.resources(),
        }
    }

    fn theme(&self) -> Theme {
        let resources = {
            let state = self.state.lock();
            match (&state.resources, &state.theme) {
                (None, _) => None,
                (Some(_), Some(theme)) => return theme.clone(),
                (Some(resources), None) => Some(resources.clone()),
            }
        };
        let Some(resources) = resources else {
            return self.base.theme();
        };

        let theme = Theme::derived(resources.clone(), &self.base.theme());
        let mut state = self.state.lock();
        // only cache if the delegate did not move while the theme was built
        if same_resources(state.resources.as_ref(), Some(&resources)) {
            state.theme = Some(theme.clone());
        }
        theme
    }

    fn as_override(&self) -> Option<&OverrideContext> {
        Some(self)
    }
}

impl std::fmt::Debug for OverrideContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("OverrideContext")
            .field("window", &self.window)
            .field("resources", &describe(state.resources.as_ref()))
            .field("theme_cached", &state.theme.is_some())
            .field("rebuild_pending", &state.rebuild_pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HostContext;
    use crate::headless::HeadlessWindow;
    use crate::resources::{ResourceId, ResourceTable, ResourceType, ResourceValue, Style, identity};

    const TITLE: ResourceId = ResourceId::app(0x0b, 0);
    const TEXT_COLOR: ResourceId = ResourceId::app(0x01, 0);
    const APP_THEME: ResourceId = ResourceId::app(0x0c, 0);

    fn bundle(label: &str, title: &str, color: u32) -> SharedResources {
        ResourceTable::builder(label)
            .value(TITLE, ResourceType::String, "title", title)
            .style(APP_THEME, "AppTheme", Style::new().with(TEXT_COLOR, ResourceValue::Color(color)))
            .asset("banner.txt", title.as_bytes().to_vec())
            .build()
            .into_shared()
    }

    fn window() -> (SharedResources, Arc<HeadlessWindow>) {
        let host = bundle("host", "Host", 0xff000000);
        let base = Arc::new(HostContext::new(host.clone()).with_theme_style(APP_THEME));
        (host, HeadlessWindow::new(base))
    }

    #[test]
    fn facade_is_installed_once() {
        let (_, window) = window();
        let first = OverrideContext::apply(window.as_ref(), Some(bundle("r1", "One", 1))).unwrap();
        let second = OverrideContext::apply(window.as_ref(), Some(bundle("r2", "Two", 2))).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        let slot = window.context_slot().unwrap();
        assert!(Arc::ptr_eq(&OverrideContext::installed_in(slot).unwrap(), &first));
    }

    #[test]
    fn same_set_twice_needs_no_rebuild() {
        let (_, window) = window();
        let r1 = bundle("r1", "One", 1);

        OverrideContext::apply(window.as_ref(), Some(r1.clone())).unwrap();
        let facade = OverrideContext::apply(window.as_ref(), Some(r1)).unwrap();

        assert!(!facade.requires_rebuild());
    }

    #[test]
    fn different_set_always_flags_rebuild() {
        let (_, window) = window();
        let facade = OverrideContext::apply(window.as_ref(), Some(bundle("r1", "One", 1))).unwrap();
        facade.take_rebuild_request();

        OverrideContext::apply(window.as_ref(), Some(bundle("r2", "Two", 2))).unwrap();
        assert!(facade.requires_rebuild());

        // already pending: a further change keeps it set
        OverrideContext::apply(window.as_ref(), Some(bundle("r3", "Three", 3))).unwrap();
        assert!(facade.take_rebuild_request());
        assert!(!facade.requires_rebuild());
    }

    #[test]
    fn reset_restores_host_resolvers() {
        let (host, window) = window();
        let r1 = bundle("r1", "One", 1);
        let facade = OverrideContext::apply(window.as_ref(), Some(r1.clone())).unwrap();
        assert_eq!(identity(&facade.resources()), identity(&r1));
        facade.take_rebuild_request();

        OverrideContext::reset(window.as_ref()).unwrap();

        assert!(facade.delegate().is_none());
        assert!(facade.requires_rebuild());
        assert_eq!(identity(&facade.resources()), identity(&host));
        assert_eq!(facade.assets().open("banner.txt").as_deref(), Some(&b"Host"[..]));
    }

    #[test]
    fn lookups_use_delegate() {
        let (_, window) = window();
        let r1 = bundle("r1", "One", 1);
        let facade = OverrideContext::apply(window.as_ref(), Some(r1)).unwrap();

        assert_eq!(facade.resources().value(TITLE), Some(ResourceValue::from("One")));
        assert_eq!(facade.assets().open("banner.txt").as_deref(), Some(&b"One"[..]));
    }

    #[test]
    fn theme_is_layered_and_recomputed_after_change() {
        let (_, window) = window();
        let facade = OverrideContext::apply(window.as_ref(), None).unwrap();
        assert_eq!(facade.theme().resolve(TEXT_COLOR), Some(ResourceValue::Color(0xff000000)));

        OverrideContext::apply(window.as_ref(), Some(bundle("r1", "One", 0xff0000ff))).unwrap();
        let first = facade.theme();
        assert_eq!(first.applied_styles().collect::<Vec<_>>(), vec![APP_THEME]);
        assert_eq!(first.resolve(TEXT_COLOR), Some(ResourceValue::Color(0xff0000ff)));
        assert_eq!(identity(facade.theme().resources()), identity(first.resources()));

        OverrideContext::apply(window.as_ref(), Some(bundle("r2", "Two", 0xffff0000))).unwrap();
        assert_eq!(facade.theme().resolve(TEXT_COLOR), Some(ResourceValue::Color(0xffff0000)));
    }

    #[test]
    fn slot_memo_cannot_shadow_facade() {
        let (host, window) = window();
        let slot = window.context_slot().unwrap();
        assert_eq!(identity(&slot.resources()), identity(&host));

        let r1 = bundle("r1", "One", 1);
        OverrideContext::apply(window.as_ref(), Some(r1.clone())).unwrap();

        assert_eq!(identity(&slot.resources()), identity(&r1));
        assert_eq!(slot.theme().resolve(TEXT_COLOR), Some(ResourceValue::Color(1)));
    }

    #[test]
    fn same_set_twice_on_resolved_window_needs_no_rebuild() {
        let (_, window) = window();
        window.context_slot().unwrap().resources();
        let r1 = bundle("r1", "One", 1);

        let facade = OverrideContext::apply(window.as_ref(), Some(r1.clone())).unwrap();
        assert!(!facade.requires_rebuild());
        OverrideContext::apply(window.as_ref(), Some(r1)).unwrap();
        assert!(!facade.requires_rebuild());

        OverrideContext::apply(window.as_ref(), Some(bundle("r2", "Two", 2))).unwrap();
        assert!(facade.requires_rebuild());
    }

    #[test]
    fn null_then_value_flags_rebuild() {
        let (_, window) = window();
        let facade = OverrideContext::apply(window.as_ref(), None).unwrap();
        assert!(!facade.requires_rebuild());

        OverrideContext::apply(window.as_ref(), Some(bundle("r1", "One", 1))).unwrap();
        assert!(facade.requires_rebuild());
    }

    #[test]
    fn missing_slot_is_integrity_error() {
        let window = HeadlessWindow::without_slot();
        let err = OverrideContext::apply(window.as_ref(), None).unwrap_err();
        assert_eq!(err.reason, IntegrityReason::MissingSlot);
        assert_eq!(err.window, window.id());
    }

    #[test]
    fn foreign_facade_is_integrity_error() {
        let (_, owner) = window();
        let facade = OverrideContext::apply(owner.as_ref(), Some(bundle("r1", "One", 1))).unwrap();

        let borrower = HeadlessWindow::new(facade);
        let err = OverrideContext::apply(borrower.as_ref(), None).unwrap_err();
        assert_eq!(err.reason, IntegrityReason::ForeignFacade);
        assert!(borrower.context_slot().unwrap().override_context().is_none());
    }
}
