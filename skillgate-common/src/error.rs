//! Error types for the skill gate.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for skill gate operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// IO error during stdin/stdout operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The rule set could not be located or loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while locating or loading the skill rules document.
///
/// Any of these aborts the whole evaluation; there is no partial load.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rules file does not exist.
    #[error("skill rules not found at {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The rules file exists but could not be read.
    #[error("failed to read skill rules at {}: {source}", path.display())]
    Read {
        /// Path of the rules file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The rules document is not well-formed.
    #[error("invalid skill rules in {}: {source}", path.display())]
    Parse {
        /// Path of the rules file, or `<inline>` for in-memory documents.
        path: PathBuf,
        /// Underlying JSON error, including the offending line and column.
        #[source]
        source: serde_json::Error,
    },

    /// The working directory could not be determined to resolve the project root.
    #[error("failed to determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}
