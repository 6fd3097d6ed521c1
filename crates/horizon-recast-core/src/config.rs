//! Runtime configuration for resource overriding.
//!
//! Configuration is plain TOML and every key is optional:
//!
//! ```toml
//! rebuild_policy = "on_resume"
//! warn_on_unexpected_transition = true
//! log_filter = "horizon_recast=debug"
//! ```
//!
//! ```
//! use horizon_recast_core::config::{RebuildPolicy, RecastConfig};
//!
//! let config = RecastConfig::from_toml_str("rebuild_policy = \"never\"").unwrap();
//! assert_eq!(config.rebuild_policy, RebuildPolicy::Never);
//! assert!(config.warn_on_unexpected_transition);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// When a window flagged for rebuild is actually recreated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebuildPolicy {
    /// Recreate the window the next time it reaches the foreground.
    #[default]
    OnResume,
    /// Never recreate; windows only pick up new resources for lookups made
    /// after the override.
    Never,
}

/// Settings shared by the override facade and the window tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecastConfig {
    /// Rebuild behaviour for windows whose resources changed.
    pub rebuild_policy: RebuildPolicy,
    /// Log a warning when the host reports a lifecycle transition that does
    /// not follow the window state machine.
    pub warn_on_unexpected_transition: bool,
    /// `tracing_subscriber::EnvFilter` directive used by [`crate::logging::init`].
    pub log_filter: String,
}

impl Default for RecastConfig {
    fn default() -> Self {
        Self {
            rebuild_policy: RebuildPolicy::OnResume,
            warn_on_unexpected_transition: true,
            log_filter: "info".to_string(),
        }
    }
}

impl RecastConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::parse(None, e))
    }

    /// Read a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = toml::from_str(&source)
            .map_err(|e| ConfigError::parse(Some(path.to_path_buf()), e))?;
        tracing::debug!(target: crate::logging::targets::CONFIG, path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Serialize this configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Whether resumed windows with a pending rebuild should be recreated.
    pub fn rebuilds_on_resume(&self) -> bool {
        self.rebuild_policy == RebuildPolicy::OnResume
    }
}
