//! Prelude module for Horizon Recast.
//!
//! ```ignore
//! use horizon_recast::prelude::*;
//! ```

// ============================================================================
// Configuration and Dispatch
// ============================================================================

pub use horizon_recast_core::{RebuildPolicy, RecastConfig, Signal, UiDispatcher};

// ============================================================================
// Resources
// ============================================================================

pub use horizon_recast_context::resources::{
    Assets, ResourceId, ResourceTable, ResourceType, ResourceValue, Resources, SharedResources,
    Style, Theme, same_resources,
};

// ============================================================================
// Windows and Overrides
// ============================================================================

pub use horizon_recast_context::{
    AggregateOverrideError, ApplicationState, Context, ContextSlot, HeadlessWindow, HostContext,
    IntegrityError, LifecycleEvent, LifecycleObserver, LifecycleStage, OverrideContext, Window,
    WindowId, WindowTracker,
};

// ============================================================================
// Manifests
// ============================================================================

pub use horizon_recast_idgen::{IdClass, ManifestBuilder};
