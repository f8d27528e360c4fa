//! Configuration update error types.
//!
//! Domain-specific errors for loading, merging, reconciling and writing
//! configuration files. Every variant carries the file path it concerns so the
//! caller can report the failure without additional context.

use std::path::PathBuf;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Configuration update errors.
///
/// None of these are recovered internally except a missing file for which a
/// default body was supplied. All other failures propagate to the caller with
/// the originating cause attached.
#[derive(Error, Debug)]
pub enum ConfigUpdateError {
    /// Reading, listing, copying or writing a file failed.
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No registered handler accepts the file's extension or explicit type.
    #[error("Could not find suitable handler for {path} (format '{format}')")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// The handler rejected the raw text of the file.
    #[error("Failed to parse {path} as {format}: {reason}")]
    Parse {
        path: PathBuf,
        format: String,
        reason: String,
    },

    /// The handler could not represent the merged value in its format.
    #[error("Failed to serialize {path} as {format}: {reason}")]
    Serialize {
        path: PathBuf,
        format: String,
        reason: String,
    },
}

impl ConfigUpdateError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the file path the error relates to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. }
            | Self::UnsupportedFormat { path, .. }
            | Self::Parse { path, .. }
            | Self::Serialize { path, .. } => path,
        }
    }
}

/// Result type alias for configuration update operations.
pub type UpdateResult<T> = Result<T, ConfigUpdateError>;
