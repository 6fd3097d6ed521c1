//! A windowless host implementation.
//!
//! [`HeadlessWindow`] implements the [`Window`] contract without any native
//! surface: it owns a context slot and a [`UiDispatcher`], and "recreating"
//! it just drops the slot's memoized lookups and counts the rebuild. It is
//! what tools and tests drive when there is no real UI toolkit underneath.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_recast_core::logging::targets;
use horizon_recast_core::{Result, UiDispatcher, UiTask};

use crate::context::{Context, ContextSlot, HostContext};
use crate::resources::SharedResources;
use crate::window::{Window, WindowId};

/// A host window with no native surface.
#[derive(Debug)]
pub struct HeadlessWindow {
    id: WindowId,
    slot: Option<ContextSlot>,
    ui: UiDispatcher,
    recreations: AtomicUsize,
}

impl HeadlessWindow {
    /// Create a window bound to `base`, with the current thread as its UI
    /// thread.
    pub fn new(base: Arc<dyn Context>) -> Arc<Self> {
        Self::build(Some(ContextSlot::new(base)))
    }

    /// Create a window whose base context is a plain [`HostContext`].
    pub fn with_resources(resources: SharedResources) -> Arc<Self> {
        Self::new(Arc::new(HostContext::new(resources)))
    }

    /// Create a window that exposes no context slot.
    pub fn without_slot() -> Arc<Self> {
        Self::build(None)
    }

    fn build(slot: Option<ContextSlot>) -> Arc<Self> {
        Arc::new(Self {
            id: WindowId::next(),
            slot,
            ui: UiDispatcher::new(),
            recreations: AtomicUsize::new(0),
        })
    }

    /// The window's UI thread queue.
    pub fn dispatcher(&self) -> &UiDispatcher {
        &self.ui
    }

    /// How many times the window has been recreated.
    pub fn recreate_count(&self) -> usize {
        self.recreations.load(Ordering::SeqCst)
    }
}

impl Window for HeadlessWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn context_slot(&self) -> Option<&ContextSlot> {
        self.slot.as_ref()
    }

    fn recreate(&self) {
        self.ui
            .affinity()
            .debug_assert_same_thread("HeadlessWindow::recreate called off the UI thread");
        if let Some(slot) = &self.slot {
            slot.invalidate();
        }
        let count = self.recreations.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(target: targets::TRACKER, window = %self.id, count, "headless window recreated");
    }

    fn post_to_ui(&self, task: UiTask) -> Result<()> {
        self.ui.post_boxed(task).map(|_| ())
    }
}
