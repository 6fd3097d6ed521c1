//! Error types for manifest generation.

use std::path::PathBuf;

use horizon_recast_context::ResourceId;

/// Result type alias for manifest generation.
pub type Result<T> = std::result::Result<T, IdGenError>;

/// Errors raised while collecting ids or writing manifests.
#[derive(Debug, thiserror::Error)]
pub enum IdGenError {
    /// An id inside the manifest range has no entry in the resolver.
    #[error("resource {0} is not known to the resolver")]
    UnknownResource(ResourceId),

    /// A line of an id listing could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The id listing could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML writer failed.
    #[error("failed to write manifest: {0}")]
    Write(#[from] std::io::Error),

    /// The writer produced invalid UTF-8.
    #[error("manifest is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl IdGenError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
