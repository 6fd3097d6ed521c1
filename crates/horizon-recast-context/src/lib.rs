//! Swappable resource contexts for Horizon Recast.
//!
//! Every host window resolves its assets, resources and theme through a
//! [`ContextSlot`]. Installing an [`OverrideContext`] into that slot lets the
//! resources be replaced at runtime, per window or globally through the
//! [`WindowTracker`], without restarting the application. Windows whose
//! resources changed are recreated the next time they come to the
//! foreground.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_recast_context::prelude::*;
//!
//! let tracker = WindowTracker::new(RecastConfig::default());
//! let host = ResourceTable::builder("host").build().into_shared();
//! let headless = HeadlessWindow::with_resources(host);
//! let window: Arc<dyn Window> = headless.clone();
//!
//! tracker.on_created(&window);
//! tracker.override_default_for(window.as_ref()).unwrap();
//! tracker.on_started(&window);
//! tracker.on_resumed(&window);
//!
//! let bundle = ResourceTable::builder("bundle-1").build().into_shared();
//! tracker.set_global_resources(Some(bundle)).unwrap();
//!
//! // the rebuild check runs on the window's UI thread
//! headless.dispatcher().process_pending();
//! assert_eq!(headless.recreate_count(), 1);
//! ```

pub mod context;
pub mod error;
pub mod headless;
pub mod lifecycle;
pub mod override_context;
pub mod resources;
pub mod tracker;
pub mod window;

pub use context::{Context, ContextSlot, HostContext};
pub use error::{AggregateOverrideError, Error, IntegrityError, IntegrityReason, Result};
pub use headless::HeadlessWindow;
pub use lifecycle::{ApplicationState, LifecycleEvent, LifecycleObserver, LifecycleStage};
pub use override_context::OverrideContext;
pub use resources::{
    Assets, ResourceId, ResourceTable, ResourceType, ResourceValue, Resources, SharedAssets,
    SharedResources, Style, Theme, same_resources,
};
pub use tracker::WindowTracker;
pub use window::{Window, WindowId};

/// Commonly used types.
pub mod prelude {
    pub use crate::context::{Context, ContextSlot, HostContext};
    pub use crate::error::{AggregateOverrideError, IntegrityError, IntegrityReason};
    pub use crate::headless::HeadlessWindow;
    pub use crate::lifecycle::{ApplicationState, LifecycleEvent, LifecycleObserver, LifecycleStage};
    pub use crate::override_context::OverrideContext;
    pub use crate::resources::{
        Assets, ResourceId, ResourceTable, ResourceType, ResourceValue, Resources,
        SharedResources, Style, Theme, same_resources,
    };
    pub use crate::tracker::WindowTracker;
    pub use crate::window::{Window, WindowId};
    pub use horizon_recast_core::{RebuildPolicy, RecastConfig};
}
