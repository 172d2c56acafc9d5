//! Error types for snapshot persistence
//!
//! Store operations themselves never fail; only the optional snapshot hook
//! in [`crate::persist`] touches the filesystem.

use std::path::PathBuf;

/// Errors while writing or reading a state snapshot
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// IO error on the snapshot file
    #[error("io error on snapshot {}: {source}", path.display())]
    Io {
        /// Snapshot path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// State could not be encoded
    #[error("failed to encode state snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// Snapshot could not be decoded
    #[error("failed to decode snapshot {}: {source}", path.display())]
    Decode {
        /// Snapshot path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

impl PersistError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create decode error for path
    pub fn decode_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }
}
