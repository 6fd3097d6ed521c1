//! The host window contract.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use horizon_recast_core::{Result, UiTask};

use crate::context::ContextSlot;

/// A unique identifier for a host window, used in logs and signals.
///
/// Windows are tracked by object identity; the id is only a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

/// Global counter for generating unique window IDs.
static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

impl WindowId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value of this window ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// A top-level host window.
///
/// Hosts own their windows; this layer only ever holds them weakly.
pub trait Window: Send + Sync + 'static {
    /// The window's label.
    fn id(&self) -> WindowId;

    /// The window's context indirection point.
    ///
    /// Returns `None` when the host cannot expose one for this window, in
    /// which case resources cannot be overridden and the window keeps its
    /// host-default resources.
    fn context_slot(&self) -> Option<&ContextSlot>;

    /// Tear the window down and rebuild it through the host's saved-state
    /// mechanism. Called on the window's UI thread.
    fn recreate(&self);

    /// Queue `task` onto the window's UI thread.
    fn post_to_ui(&self, task: UiTask) -> Result<()>;
}

/// Identity key of a window allocation.
#[inline]
pub(crate) fn window_key(window: &Arc<dyn Window>) -> usize {
    Arc::as_ptr(window) as *const () as usize
}
