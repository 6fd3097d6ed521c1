//! Window lifecycle stages and host notifications.
//!
//! ```text
//! NONE --created--> CREATED --started--> STARTED --resumed--> RESUMED
//! RESUMED --paused--> STARTED --stopped--> CREATED
//! STARTED --destroyed--> (untracked)
//! CREATED --destroyed--> (untracked)
//! ```

use std::fmt;
use std::sync::Arc;

use crate::window::Window;

/// How far a window has progressed towards the foreground.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleStage {
    /// Not tracked.
    #[default]
    None,
    /// Created but not visible.
    Created,
    /// Visible but not in the foreground.
    Started,
    /// In the foreground and interactive.
    Resumed,
}

impl LifecycleStage {
    /// Whether the window is alive from the tracker's point of view.
    pub fn is_live(self) -> bool {
        self >= Self::Created
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Created => "created",
            Self::Started => "started",
            Self::Resumed => "resumed",
        })
    }
}

/// A lifecycle notification delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The window was constructed and attached to its base context.
    Created,
    /// The window became visible.
    Started,
    /// The window moved to the foreground.
    Resumed,
    /// The window left the foreground but is still visible.
    Paused,
    /// The window is no longer visible.
    Stopped,
    /// The window was torn down and will not be seen again.
    Destroyed,
}

impl LifecycleEvent {
    /// The stage a window is in after this event; `None` once destroyed.
    pub fn target(self) -> Option<LifecycleStage> {
        match self {
            Self::Created => Some(LifecycleStage::Created),
            Self::Started => Some(LifecycleStage::Started),
            Self::Resumed => Some(LifecycleStage::Resumed),
            Self::Paused => Some(LifecycleStage::Started),
            Self::Stopped => Some(LifecycleStage::Created),
            Self::Destroyed => None,
        }
    }

    /// Whether a window in `from` may receive this event.
    pub fn is_expected_from(self, from: LifecycleStage) -> bool {
        use LifecycleStage as S;
        match self {
            Self::Created => from == S::None,
            Self::Started => from == S::Created,
            Self::Resumed => from == S::Started,
            Self::Paused => from == S::Resumed,
            Self::Stopped => from == S::Started,
            Self::Destroyed => matches!(from, S::Created | S::Started),
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Started => "started",
            Self::Resumed => "resumed",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Destroyed => "destroyed",
        })
    }
}

/// Aggregate visibility of the application's windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationState {
    /// No live windows.
    NoWindows,
    /// Live windows exist but none is in the foreground.
    Backgrounded,
    /// At least one window is in the foreground.
    Foregrounded,
}

/// Receives window lifecycle notifications from the host.
///
/// The host registers an observer once at startup and calls it serially on
/// the UI thread for every window.
pub trait LifecycleObserver: Send + Sync {
    /// The window was created. Called before any content is inflated.
    fn on_created(&self, _window: &Arc<dyn Window>) {}
    /// The window became visible.
    fn on_started(&self, _window: &Arc<dyn Window>) {}
    /// The window entered the foreground.
    fn on_resumed(&self, _window: &Arc<dyn Window>) {}
    /// The window left the foreground.
    fn on_paused(&self, _window: &Arc<dyn Window>) {}
    /// The window is no longer visible.
    fn on_stopped(&self, _window: &Arc<dyn Window>) {}
    /// The window was destroyed; the host drops its handle after this returns.
    fn on_destroyed(&self, _window: &Arc<dyn Window>) {}

    /// The host is checkpointing the window's state before it may be torn
    /// down. Nothing in this layer persists state.
    fn on_save_state(&self, _window: &Arc<dyn Window>) {}

    /// Dispatch an event to the matching callback.
    fn notify(&self, window: &Arc<dyn Window>, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Created => self.on_created(window),
            LifecycleEvent::Started => self.on_started(window),
            LifecycleEvent::Resumed => self.on_resumed(window),
            LifecycleEvent::Paused => self.on_paused(window),
            LifecycleEvent::Stopped => self.on_stopped(window),
            LifecycleEvent::Destroyed => self.on_destroyed(window),
        }
    }
}
