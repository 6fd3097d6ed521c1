//! Error types for Horizon Recast core services.

use std::path::PathBuf;

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, RecastError>;

/// The main error type for core operations.
#[derive(Debug, thiserror::Error)]
pub enum RecastError {
    /// Configuration could not be loaded or stored.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The UI dispatcher can no longer accept tasks.
    #[error("UI dispatcher has shut down")]
    DispatcherClosed,
}

/// Configuration-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML document could not be parsed into a configuration.
    #[error("Invalid config{}: {source}", describe_path(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error, optionally tied to the file it came from.
    pub fn parse(path: Option<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse { path, source }
    }
}

fn describe_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" '{}'", path.display()),
        None => String::new(),
    }
}
