//! Configuration file errors.
//!
//! Out-of-range values are never errors: the config layer clamps them.
//! Only an unreadable or unparsable file is reported.

use std::path::PathBuf;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid for its format
    #[error("Failed to parse config file {path}: {reason}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// The extension does not name a supported format
    #[error("Unsupported config format for {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    /// The effective configuration could not be rendered
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}

impl ConfigError {
    /// Create a parse error.
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ConfigError::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
