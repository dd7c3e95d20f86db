//! Storage error handling
//!
//! Provides typed errors for state backend operations with descriptive
//! messages and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// The storage medium cannot be used at all
    #[error("Storage unavailable ({backend}): {reason}")]
    Unavailable { backend: String, reason: String },

    /// Failed to create data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File not found (when expected to exist)
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document could not be serialized
    #[error("Failed to serialize state document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    /// Create an error from a failed read with path context
    pub fn from_read_io(error: io::Error, path: PathBuf) -> Self {
        Self::classify(error, path).unwrap_or_else(|(error, path)| StorageError::ReadError {
            path,
            source: error,
        })
    }

    /// Create an error from a failed write with path context
    pub fn from_write_io(error: io::Error, path: PathBuf) -> Self {
        Self::classify(error, path).unwrap_or_else(|(error, path)| StorageError::WriteError {
            path,
            source: error,
        })
    }

    /// Classifies the error based on its kind (permission, disk full, etc.)
    fn classify(error: io::Error, path: PathBuf) -> Result<Self, (io::Error, PathBuf)> {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Ok(StorageError::PermissionDenied {
                path,
                source: error,
            }),
            io::ErrorKind::NotFound => Ok(StorageError::NotFound { path }),
            _ if is_disk_full_error(&error) => Ok(StorageError::DiskFull {
                path,
                source: error,
            }),
            _ => Err((error, path)),
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions, or point PYP_DATA_DIR somewhere writable.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            StorageError::Unavailable { .. } => {
                Some("Progress is not being saved in this session.")
            }
            _ => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::from_write_io(io_err, PathBuf::from("/test/path"));

        assert!(matches!(err, StorageError::PermissionDenied { .. }));
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_not_found_classification() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = StorageError::from_read_io(io_err, PathBuf::from("/missing/file"));

        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn test_disk_full_detection() {
        let io_err = io::Error::new(io::ErrorKind::Other, "No space left on device");
        let err = StorageError::from_write_io(io_err, PathBuf::from("/full/disk"));

        assert!(matches!(err, StorageError::DiskFull { .. }));
    }

    #[test]
    fn test_fallback_depends_on_direction() {
        let read = StorageError::from_read_io(
            io::Error::new(io::ErrorKind::Other, "bad sector"),
            PathBuf::from("/data/pypState.json"),
        );
        assert!(matches!(read, StorageError::ReadError { .. }));

        let write = StorageError::from_write_io(
            io::Error::new(io::ErrorKind::Other, "bad sector"),
            PathBuf::from("/data/pypState.json"),
        );
        assert!(matches!(write, StorageError::WriteError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::PermissionDenied {
            path: PathBuf::from("/test/file"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let msg = err.to_string();
        assert!(msg.contains("Permission denied"));
        assert!(msg.contains("/test/file"));
    }

    #[test]
    fn test_unavailable_display() {
        let err = StorageError::Unavailable {
            backend: "unavailable".to_string(),
            reason: "no storage in this context".to_string(),
        };

        assert!(err.to_string().contains("no storage in this context"));
        assert!(err.recovery_suggestion().is_some());
    }
}
