//! Storage error handling
//!
//! Typed errors for backend operations. The `Persistence` layer never lets
//! these reach a store caller; they exist so that backends can report what
//! went wrong and the diagnostics log can say something useful.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a slot
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cannot create data directory {path:?}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied for {path:?}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No space left, or a quota was hit
    #[error("No space left while writing {path:?}")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read slot file {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write slot file {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The temp file was written but could not replace the slot file
    #[error("Cannot move {from:?} into place at {to:?}: {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The medium refused the write (read-only, capacity exhausted, ...)
    #[error("Backend '{backend}' rejected write to slot '{key}'")]
    Rejected { backend: &'static str, key: String },

    /// Slot value could not be encoded or decoded
    #[error("Slot '{key}' has an invalid encoding: {source}")]
    Encoding {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("SQLite error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StorageError {
    /// Wrap a write-side I/O error, classifying permission and space problems
    pub fn from_io(source: io::Error, path: PathBuf) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            StorageError::PermissionDenied { path, source }
        } else if looks_like_disk_full(&source) {
            StorageError::DiskFull { path, source }
        } else {
            StorageError::WriteError { path, source }
        }
    }

    /// Whether the user can fix the cause without touching notekeep itself
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StorageError::DiskFull { .. }
                | StorageError::PermissionDenied { .. }
                | StorageError::Rejected { .. }
        )
    }

    /// Short hint for the log line accompanying this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        let hint = match self {
            StorageError::DiskFull { .. } => {
                "Free up disk space; notes are kept in memory until then."
            }
            StorageError::PermissionDenied { .. } | StorageError::CreateDirectory { .. } => {
                "Check permissions on the notekeep data directory (see `notekeep config show`)."
            }
            StorageError::Rejected { .. } => {
                "Changes are kept in memory until the next successful save."
            }
            _ => return None,
        };
        Some(hint)
    }
}

fn looks_like_disk_full(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    ["no space left", "disk full", "quota exceeded", "not enough space"]
        .iter()
        .any(|needle| msg.contains(needle))
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
