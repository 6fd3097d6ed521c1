//! Contexts and the per-window context slot.
//!
//! A [`Context`] is what a window consults for its assets, resources and
//! theme. The host binds one to every window at construction time through a
//! [`ContextSlot`]; the slot is the single indirection point the override
//! facade is installed into. Installing is done once per window, afterwards
//! the installed [`OverrideContext`] is mutated in place.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::override_context::OverrideContext;
use crate::resources::{ResourceId, SharedAssets, SharedResources, Theme};

/// Resource, asset and theme resolution for one window.
pub trait Context: Send + Sync {
    /// The asset store to read from.
    fn assets(&self) -> SharedAssets;

    /// The resource set to resolve ids against.
    fn resources(&self) -> SharedResources;

    /// The window theme.
    fn theme(&self) -> Theme;

    /// Downcast hook for the override facade.
    fn as_override(&self) -> Option<&OverrideContext> {
        None
    }
}

/// The context a host binds to a window when nothing overrides it.
pub struct HostContext {
    resources: SharedResources,
    theme: Theme,
}

impl HostContext {
    /// Create a host context with an empty theme.
    pub fn new(resources: SharedResources) -> Self {
        let theme = Theme::new(resources.clone());
        Self { resources, theme }
    }

    /// Apply a theme style, as a window declaring its theme would.
    pub fn with_theme_style(mut self, style: ResourceId) -> Self {
        self.theme.apply_style(style, true);
        self
    }
}

impl Context for HostContext {
    fn assets(&self) -> SharedAssets {
        self.resources.assets()
    }

    fn resources(&self) -> SharedResources {
        self.resources.clone()
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext")
            .field("resources", &self.resources.label())
            .field("theme", &self.theme)
            .finish()
    }
}

#[derive(Default)]
struct SlotCache {
    resources: Option<SharedResources>,
    theme: Option<Theme>,
    // bumped by every invalidation
    generation: u64,
}

/// A window's context indirection point.
///
/// The slot resolves through the installed override facade when there is
/// one and through the host-bound base context otherwise. Like a host's own
/// context wrapper it memoizes the resource set and theme it hands out; those
/// memos are dropped whenever a facade is installed or re-targeted so they
/// cannot shadow it.
pub struct ContextSlot {
    base: Arc<dyn Context>,
    installed: RwLock<Option<Arc<OverrideContext>>>,
    cache: Mutex<SlotCache>,
}

static_assertions::assert_impl_all!(ContextSlot: Send, Sync);

impl ContextSlot {
    /// Create a slot bound to the host's base context.
    pub fn new(base: Arc<dyn Context>) -> Self {
        Self {
            base,
            installed: RwLock::new(None),
            cache: Mutex::new(SlotCache::default()),
        }
    }

    /// The host-bound base context.
    pub fn base(&self) -> &Arc<dyn Context> {
        &self.base
    }

    /// The installed override facade, if any.
    pub fn override_context(&self) -> Option<Arc<OverrideContext>> {
        self.installed.read().clone()
    }

    /// The context lookups currently go through.
    pub fn current(&self) -> Arc<dyn Context> {
        match self.override_context() {
            Some(facade) => facade as Arc<dyn Context>,
            None => self.base.clone(),
        }
    }

    /// The window's assets.
    pub fn assets(&self) -> SharedAssets {
        self.current().assets()
    }

    /// The window's resource set, memoized until the next install.
    ///
    /// A lookup that races an install is returned but not memoized.
    pub fn resources(&self) -> SharedResources {
        let generation = {
            let cache = self.cache.lock();
            if let Some(resources) = &cache.resources {
                return resources.clone();
            }
            cache.generation
        };
        let resources = self.current().resources();
        let mut cache = self.cache.lock();
        if cache.generation == generation {
            cache.resources = Some(resources.clone());
        }
        resources
    }

    /// The window's theme, memoized until the next install.
    pub fn theme(&self) -> Theme {
        let generation = {
            let cache = self.cache.lock();
            if let Some(theme) = &cache.theme {
                return theme.clone();
            }
            cache.generation
        };
        let theme = self.current().theme();
        let mut cache = self.cache.lock();
        if cache.generation == generation {
            cache.theme = Some(theme.clone());
        }
        theme
    }

    /// Whether the slot has handed out resources or a theme since the last
    /// install.
    pub fn has_resolved(&self) -> bool {
        let cache = self.cache.lock();
        cache.resources.is_some() || cache.theme.is_some()
    }

    /// Forget memoized lookups, e.g. after the host rebuilt the window.
    ///
    /// Returns whether anything was memoized.
    pub fn invalidate(&self) -> bool {
        let mut cache = self.cache.lock();
        let had = cache.resources.is_some() || cache.theme.is_some();
        cache.resources = None;
        cache.theme = None;
        cache.generation += 1;
        had
    }

    /// Install a facade, or return the one already installed.
    ///
    /// `create` only runs when the slot is empty.
    pub(crate) fn install_with(
        &self,
        create: impl FnOnce() -> Arc<OverrideContext>,
    ) -> (Arc<OverrideContext>, bool) {
        let mut installed = self.installed.write();
        if let Some(existing) = installed.as_ref() {
            return (existing.clone(), false);
        }
        let facade = create();
        *installed = Some(facade.clone());
        (facade, true)
    }
}

impl std::fmt::Debug for ContextSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextSlot")
            .field("overridden", &self.installed.read().is_some())
            .field("resolved", &self.has_resolved())
            .finish()
    }
}
