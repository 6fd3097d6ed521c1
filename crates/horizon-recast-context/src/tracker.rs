//! Window lifecycle tracking and global resource overrides.
//!
//! The [`WindowTracker`] is registered with the host once as a
//! [`LifecycleObserver`] and follows every window through its lifecycle
//! stages. It holds windows weakly: a window the host has dropped disappears
//! from every query, whether or not it was reported as destroyed.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_recast_context::prelude::*;
//!
//! let tracker = WindowTracker::new(RecastConfig::default());
//! let host = ResourceTable::builder("host").build().into_shared();
//! let window: Arc<dyn Window> = HeadlessWindow::with_resources(host);
//!
//! tracker.on_created(&window);
//! tracker.on_started(&window);
//! tracker.on_resumed(&window);
//!
//! assert_eq!(tracker.application_state(), ApplicationState::Foregrounded);
//! assert!(tracker.top_window().is_some());
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::RwLock;

use horizon_recast_core::logging::targets;
use horizon_recast_core::{RecastConfig, Signal};

use crate::error::{AggregateOverrideError, IntegrityError};
use crate::lifecycle::{ApplicationState, LifecycleEvent, LifecycleObserver, LifecycleStage};
use crate::override_context::OverrideContext;
use crate::resources::{SharedResources, describe};
use crate::window::{Window, WindowId, window_key};

/// Global tracker instance.
static GLOBAL_TRACKER: OnceLock<Arc<WindowTracker>> = OnceLock::new();

struct TrackedWindow {
    window: Weak<dyn Window>,
    id: WindowId,
    stage: LifecycleStage,
    resumed_at: u64,
}

impl TrackedWindow {
    fn is_alive(&self) -> bool {
        self.window.strong_count() > 0
    }
}

/// Follows the lifecycle of every host window and owns the global resource
/// set.
pub struct WindowTracker {
    windows: RwLock<HashMap<usize, TrackedWindow>>,
    global_resources: RwLock<Option<SharedResources>>,
    resume_sequence: AtomicU64,
    config: RwLock<RecastConfig>,
    stage_changed: Signal<(WindowId, LifecycleStage)>,
    application_state_changed: Signal<ApplicationState>,
    window_rebuilt: Signal<WindowId>,
}

static_assertions::assert_impl_all!(WindowTracker: Send, Sync);

impl WindowTracker {
    /// Create a standalone tracker.
    pub fn new(config: RecastConfig) -> Arc<Self> {
        Arc::new(Self {
            windows: RwLock::new(HashMap::new()),
            global_resources: RwLock::new(None),
            resume_sequence: AtomicU64::new(0),
            config: RwLock::new(config),
            stage_changed: Signal::new(),
            application_state_changed: Signal::new(),
            window_rebuilt: Signal::new(),
        })
    }

    /// Get the process-wide tracker, creating it with the default
    /// configuration on first use.
    pub fn global() -> &'static Arc<Self> {
        GLOBAL_TRACKER.get_or_init(|| Self::new(RecastConfig::default()))
    }

    /// A copy of the active configuration.
    pub fn config(&self) -> RecastConfig {
        self.config.read().clone()
    }

    /// Replace the active configuration.
    pub fn set_config(&self, config: RecastConfig) {
        tracing::debug!(target: targets::TRACKER, policy = ?config.rebuild_policy, "tracker reconfigured");
        *self.config.write() = config;
    }

    /// Emitted with the window and its new stage whenever a stage changes.
    /// Destroyed windows are reported as [`LifecycleStage::None`].
    pub fn stage_changed(&self) -> &Signal<(WindowId, LifecycleStage)> {
        &self.stage_changed
    }

    /// Emitted when the aggregate [`ApplicationState`] changes.
    pub fn application_state_changed(&self) -> &Signal<ApplicationState> {
        &self.application_state_changed
    }

    /// Emitted after a window was recreated to pick up new resources.
    pub fn window_rebuilt(&self) -> &Signal<WindowId> {
        &self.window_rebuilt
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Apply a lifecycle notification for `window`.
    ///
    /// The host is authoritative: transitions outside the state machine are
    /// applied as reported, with a warning when configured.
    pub fn handle_event(&self, window: &Arc<dyn Window>, event: LifecycleEvent) {
        let key = window_key(window);
        let id = window.id();

        let (from, to, state_before, state_after) = {
            let mut windows = self.windows.write();
            windows.retain(|_, tracked| tracked.is_alive());

            let state_before = Self::compute_state(&windows);
            let from = windows.get(&key).map_or(LifecycleStage::None, |t| t.stage);

            let to = match event.target() {
                Some(stage) => {
                    let tracked = windows.entry(key).or_insert_with(|| TrackedWindow {
                        window: Arc::downgrade(window),
                        id,
                        stage: LifecycleStage::None,
                        resumed_at: 0,
                    });
                    tracked.stage = stage;
                    if event == LifecycleEvent::Resumed {
                        tracked.resumed_at = self.resume_sequence.fetch_add(1, Ordering::Relaxed) + 1;
                    }
                    stage
                }
                None => {
                    windows.remove(&key);
                    LifecycleStage::None
                }
            };

            (from, to, state_before, Self::compute_state(&windows))
        };

        if !event.is_expected_from(from) && self.config.read().warn_on_unexpected_transition {
            tracing::warn!(
                target: targets::TRACKER,
                window = %id,
                %from,
                %event,
                "unexpected lifecycle transition"
            );
        } else {
            tracing::trace!(target: targets::TRACKER, window = %id, %from, %to, "lifecycle transition");
        }

        if from != to {
            self.stage_changed.emit((id, to));
        }
        if state_before != state_after {
            tracing::info!(
                target: targets::TRACKER,
                from = ?state_before,
                to = ?state_after,
                "application state changed"
            );
            self.application_state_changed.emit(state_after);
        }

        if event == LifecycleEvent::Resumed {
            self.check_rebuild(window.as_ref());
        }
    }

    /// Recreate `window` if its facade asks for a rebuild and the policy
    /// allows it. Returns whether the window was recreated.
    ///
    /// Must run on the window's UI thread.
    pub fn check_rebuild(&self, window: &dyn Window) -> bool {
        if !self.config.read().rebuilds_on_resume() {
            return false;
        }
        let Some(facade) = window.context_slot().and_then(OverrideContext::installed_in) else {
            return false;
        };
        if !facade.take_rebuild_request() {
            return false;
        }

        let id = window.id();
        tracing::debug!(target: targets::TRACKER, window = %id, "recreating window for new resources");
        window.recreate();
        self.window_rebuilt.emit(id);
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The stage of `window`, [`LifecycleStage::None`] if untracked.
    pub fn window_stage(&self, window: &Arc<dyn Window>) -> LifecycleStage {
        self.windows
            .read()
            .get(&window_key(window))
            .filter(|tracked| tracked.is_alive())
            .map_or(LifecycleStage::None, |tracked| tracked.stage)
    }

    /// Every live window at [`LifecycleStage::Created`] or later.
    pub fn all_windows(&self) -> Vec<Arc<dyn Window>> {
        self.windows
            .read()
            .values()
            .filter(|tracked| tracked.stage.is_live())
            .filter_map(|tracked| tracked.window.upgrade())
            .collect()
    }

    /// The resumed window. When several windows report resumed, the one
    /// resumed most recently wins.
    pub fn top_window(&self) -> Option<Arc<dyn Window>> {
        self.windows
            .read()
            .values()
            .filter(|tracked| tracked.stage == LifecycleStage::Resumed)
            .filter_map(|tracked| tracked.window.upgrade().map(|w| (tracked.resumed_at, w)))
            .max_by_key(|(resumed_at, _)| *resumed_at)
            .map(|(_, window)| window)
    }

    /// Aggregate visibility of all live windows.
    pub fn application_state(&self) -> ApplicationState {
        Self::compute_state(&self.windows.read())
    }

    /// Number of live tracked windows.
    pub fn tracked_count(&self) -> usize {
        self.windows
            .read()
            .values()
            .filter(|tracked| tracked.is_alive())
            .count()
    }

    fn compute_state(windows: &HashMap<usize, TrackedWindow>) -> ApplicationState {
        let mut live = false;
        for tracked in windows.values().filter(|t| t.is_alive()) {
            match tracked.stage {
                LifecycleStage::Resumed => return ApplicationState::Foregrounded,
                stage if stage.is_live() => live = true,
                _ => {}
            }
        }
        if live {
            ApplicationState::Backgrounded
        } else {
            ApplicationState::NoWindows
        }
    }

    // =========================================================================
    // Global resources
    // =========================================================================

    /// The resource set new windows should resolve through.
    pub fn global_resources(&self) -> Option<SharedResources> {
        self.global_resources.read().clone()
    }

    /// Make `resources` the global set and override every live window with
    /// it; `None` restores host defaults everywhere.
    ///
    /// Every window is attempted. Afterwards a rebuild check for the top
    /// window is posted to its UI thread, even if some windows failed.
    ///
    /// # Errors
    ///
    /// [`AggregateOverrideError`] listing each window that rejected the
    /// override. The global set is updated regardless.
    #[tracing::instrument(skip_all, target = "horizon_recast::tracker", level = "debug")]
    pub fn set_global_resources(
        self: &Arc<Self>,
        resources: Option<SharedResources>,
    ) -> Result<(), AggregateOverrideError> {
        *self.global_resources.write() = resources.clone();

        let windows = self.all_windows();
        let mut failures = Vec::new();
        for window in &windows {
            if let Err(err) = OverrideContext::apply(window.as_ref(), resources.clone()) {
                tracing::warn!(target: targets::TRACKER, error = %err, "window rejected resource override");
                failures.push(err);
            }
        }

        tracing::info!(
            target: targets::TRACKER,
            resources = describe(resources.as_ref()),
            windows = windows.len(),
            failed = failures.len(),
            "global resources set"
        );

        if let Some(top) = self.top_window() {
            self.schedule_rebuild_check(&top);
        }

        match AggregateOverrideError::from_failures(windows.len(), failures) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn schedule_rebuild_check(self: &Arc<Self>, window: &Arc<dyn Window>) {
        let target = Arc::downgrade(window);
        let tracker = Arc::downgrade(self);
        let posted = window.post_to_ui(Box::new(move || {
            if let (Some(tracker), Some(window)) = (tracker.upgrade(), target.upgrade()) {
                tracker.check_rebuild(window.as_ref());
            }
        }));
        if let Err(err) = posted {
            tracing::warn!(
                target: targets::TRACKER,
                window = %window.id(),
                error = %err,
                "could not schedule rebuild check"
            );
        }
    }

    /// Apply the current global set to a single window, typically while the
    /// host attaches its base context.
    pub fn override_default_for(
        &self,
        window: &dyn Window,
    ) -> Result<Arc<OverrideContext>, IntegrityError> {
        OverrideContext::apply(window, self.global_resources())
    }
}

impl LifecycleObserver for WindowTracker {
    fn on_created(&self, window: &Arc<dyn Window>) {
        self.handle_event(window, LifecycleEvent::Created);
    }

    fn on_started(&self, window: &Arc<dyn Window>) {
        self.handle_event(window, LifecycleEvent::Started);
    }

    fn on_resumed(&self, window: &Arc<dyn Window>) {
        self.handle_event(window, LifecycleEvent::Resumed);
    }

    fn on_paused(&self, window: &Arc<dyn Window>) {
        self.handle_event(window, LifecycleEvent::Paused);
    }

    fn on_stopped(&self, window: &Arc<dyn Window>) {
        self.handle_event(window, LifecycleEvent::Stopped);
    }

    fn on_destroyed(&self, window: &Arc<dyn Window>) {
        self.handle_event(window, LifecycleEvent::Destroyed);
    }

    fn notify(&self, window: &Arc<dyn Window>, event: LifecycleEvent) {
        self.handle_event(window, event);
    }
}

impl std::fmt::Debug for WindowTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let global = self.global_resources.read();
        f.debug_struct("WindowTracker")
            .field("tracked", &self.tracked_count())
            .field("state", &self.application_state())
            .field("global_resources", &describe(global.as_ref()))
            .finish()
    }
}
