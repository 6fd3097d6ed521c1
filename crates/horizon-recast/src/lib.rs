//! Horizon Recast - runtime resource overrides for host windows.
//!
//! This is the umbrella crate that re-exports all public APIs.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_recast::prelude::*;
//!
//! let tracker = horizon_recast::init(RecastConfig::default());
//!
//! let host = ResourceTable::builder("host").build().into_shared();
//! let window: Arc<dyn Window> = HeadlessWindow::with_resources(host);
//! tracker.on_created(&window);
//! tracker.override_default_for(window.as_ref()).unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

pub use horizon_recast_core::*;

pub use horizon_recast_context::{
    AggregateOverrideError, ApplicationState, Context, ContextSlot, HeadlessWindow, HostContext,
    IntegrityError, IntegrityReason, LifecycleEvent, LifecycleObserver, LifecycleStage,
    OverrideContext, WindowTracker,
};

pub mod prelude;

/// Resource contexts, windows and lifecycle tracking.
pub mod context {
    pub use horizon_recast_context::*;
}

/// Id manifest generation.
pub mod idgen {
    pub use horizon_recast_idgen::*;
}

/// Install logging and configure the process-wide tracker.
///
/// Returns the tracker the host should register as its lifecycle observer.
/// Logging is left alone if a subscriber is already installed.
pub fn init(config: RecastConfig) -> &'static Arc<WindowTracker> {
    logging::init(&config);
    let tracker = WindowTracker::global();
    tracker.set_config(config);
    tracing::info!(target: logging::targets::ROOT, "horizon recast initialized");
    tracker
}

/// [`init`] with a configuration read from a TOML file.
pub fn init_from_file(path: impl AsRef<Path>) -> Result<&'static Arc<WindowTracker>> {
    let config = RecastConfig::from_file(path)?;
    Ok(init(config))
}
