//! Harness errors

use lex_views::ConfigError;
use std::path::PathBuf;

/// Errors from loading or running a script
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Script file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Script path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Script is not a valid action list
    #[error("invalid script: {0}")]
    Script(#[source] serde_json::Error),

    /// Configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report could not be rendered
    #[error("failed to render report: {0}")]
    Render(#[source] serde_json::Error),
}

impl HarnessError {
    /// Create IO error
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
