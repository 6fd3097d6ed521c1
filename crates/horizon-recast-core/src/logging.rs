//! Logging facilities for Horizon Recast.
//!
//! Horizon Recast uses the `tracing` crate for instrumentation. Every
//! subsystem logs under its own target so a resource swap can be followed
//! end to end with a single filter directive:
//!
//! ```text
//! RUST_LOG=horizon_recast::tracker=debug,horizon_recast::override=trace
//! ```
//!
//! Applications that do not install their own subscriber can call [`init`].

use tracing_subscriber::EnvFilter;

use crate::config::RecastConfig;

/// Target names for log filtering.
pub mod targets {
    /// Root target.
    pub const ROOT: &str = "horizon_recast";
    /// Configuration loading.
    pub const CONFIG: &str = "horizon_recast::config";
    /// UI-thread task dispatch.
    pub const DISPATCH: &str = "horizon_recast::dispatch";
    /// Signal emission.
    pub const SIGNAL: &str = "horizon_recast::signal";
    /// Resource override facade.
    pub const OVERRIDE: &str = "horizon_recast::override";
    /// Window lifecycle tracker.
    pub const TRACKER: &str = "horizon_recast::tracker";
    /// Id manifest generation.
    pub const IDGEN: &str = "horizon_recast::idgen";
}

/// Install a formatting subscriber filtered by `config.log_filter`.
///
/// `RUST_LOG` takes precedence over the configured filter when set. An
/// unparsable filter falls back to `info`. Returns `false` if a global
/// subscriber was already installed.
pub fn init(config: &RecastConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(target: targets::ROOT, filter = %config.log_filter, "logging initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_share_root() {
        for target in [
            targets::CONFIG,
            targets::DISPATCH,
            targets::SIGNAL,
            targets::OVERRIDE,
            targets::TRACKER,
            targets::IDGEN,
        ] {
            assert!(target.starts_with(targets::ROOT));
        }
    }

    #[test]
    fn second_init_is_rejected() {
        let config = RecastConfig::default();
        let _ = init(&config);
        assert!(!init(&config));
    }
}
