//! Error types for resource overriding.

use crate::window::WindowId;

/// Result type alias for context operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a window's wiring could not take an override facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityReason {
    /// The host exposes no context slot for the window.
    #[error("window exposes no context slot")]
    MissingSlot,
    /// The slot's base context is itself a facade installed elsewhere.
    #[error("base context is an override facade owned by another window")]
    ForeignFacade,
}

/// A window's wiring does not have the shape the facade needs.
///
/// Fatal for that window's override attempt only; the window keeps resolving
/// through its host-default resources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot override resources of {window}: {reason}")]
pub struct IntegrityError {
    /// The window that rejected the override.
    pub window: WindowId,
    /// What was wrong with its wiring.
    pub reason: IntegrityReason,
}

impl IntegrityError {
    /// Create an integrity error.
    pub fn new(window: WindowId, reason: IntegrityReason) -> Self {
        Self { window, reason }
    }
}

/// One or more windows failed during a global override sweep.
///
/// Every live window was attempted before this was returned; windows not
/// listed in [`failures`](Self::failures) carry the new resources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{} of {attempted} windows rejected the resource override; last failure: {last}",
    .failures.len()
)]
pub struct AggregateOverrideError {
    attempted: usize,
    failures: Vec<IntegrityError>,
    #[source]
    last: IntegrityError,
}

impl AggregateOverrideError {
    /// Build from the failures of a sweep, or `None` if there were none.
    pub fn from_failures(attempted: usize, failures: Vec<IntegrityError>) -> Option<Self> {
        let last = failures.last()?.clone();
        Some(Self {
            attempted,
            failures,
            last,
        })
    }

    /// Number of windows the sweep attempted.
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    /// Every failure, in sweep order.
    pub fn failures(&self) -> &[IntegrityError] {
        &self.failures
    }

    /// The last failure encountered.
    pub fn last(&self) -> &IntegrityError {
        &self.last
    }

    /// Ids of the windows that failed.
    pub fn failed_windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.failures.iter().map(|f| f.window)
    }
}

/// Errors raised by the override layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A single window rejected an override.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    /// A global sweep finished with failures.
    #[error(transparent)]
    AggregateOverride(#[from] AggregateOverrideError),
}
