//! Error types for the playblast pipeline

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PlayblastError>;

/// Pipeline-level errors
#[derive(Error, Debug)]
pub enum PlayblastError {
    /// Missing or invalid command-line input
    #[error("{0}")]
    Usage(String),

    /// The resolved scene file does not exist
    #[error("Scene file not found: {}", .0.display())]
    SceneNotFound(PathBuf),

    /// File system failure on a specific path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The renderer process could not be started
    #[error("Failed to start renderer: {0}")]
    Spawn(#[source] std::io::Error),
}

impl PlayblastError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the two guard failures that terminate the run before any work
    pub fn is_guard_failure(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::SceneNotFound(_))
    }
}
