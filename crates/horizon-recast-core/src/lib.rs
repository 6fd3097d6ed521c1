//! Core systems for Horizon Recast.
//!
//! This crate provides the ambient services the resource-override layer is
//! built on:
//!
//! - **Configuration**: TOML-backed [`RecastConfig`]
//! - **Logging**: `tracing` targets and subscriber setup
//! - **UI Dispatch**: [`UiDispatcher`], a serial per-window task queue
//! - **Thread Affinity**: checks that UI-bound state stays on its thread
//! - **Signals**: [`Signal`] notifications for lifecycle observers
//!
//! # Dispatch Example
//!
//! ```
//! use horizon_recast_core::UiDispatcher;
//!
//! let ui = UiDispatcher::new();
//! ui.post(|| println!("runs on the UI thread")).unwrap();
//! assert_eq!(ui.process_pending(), 1);
//! ```

pub mod config;
pub mod dispatcher;
mod error;
pub mod logging;
pub mod signal;
pub mod thread_check;

pub use config::{RebuildPolicy, RecastConfig};
pub use dispatcher::{TaskId, UiDispatcher, UiTask};
pub use error::{ConfigError, RecastError, Result};
pub use signal::{ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
