//! Store error handling
//!
//! Typed errors for word store operations, with descriptive messages
//! and recovery suggestions for the front end.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::AnkiKey;

/// Errors that can occur while loading, querying or persisting a word store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The persisted document cannot be parsed as a word store
    #[error("Store '{path}' is corrupted: {details}")]
    CorruptStore { path: PathBuf, details: String },

    /// A duo word was passed that is not in the store
    #[error("Duo word '{0}' doesn't exist")]
    UnknownDuoWord(String),

    /// An anki key was passed that is not in the store
    #[error("Anki key '{0}' doesn't exist")]
    UnknownAnkiKey(AnkiKey),

    /// Vocabulary payload is not a usable vocabulary overview
    #[error("Invalid vocabulary payload: {details}")]
    InvalidImport { details: String },

    /// Permission denied accessing path, or the file appeared while creating it
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

    /// Failed to serialize the document
    #[error("Failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Create an error from an I/O error with path context
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied {
                path,
                source: error,
            },
            io::ErrorKind::NotFound => StoreError::NotFound { path },
            // StorageFull is not stable on every toolchain, so also match the message
            _ if is_disk_full_error(&error) => StoreError::DiskFull {
                path,
                source: error,
            },
            _ => StoreError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// Like [`StoreError::from_io`], but unclassified errors become `ReadError`
    pub fn from_read(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied | io::ErrorKind::NotFound => {
                Self::from_io(error, path)
            }
            _ => StoreError::ReadError {
                path,
                source: error,
            },
        }
    }

    /// Whether the error is an I/O failure on the backing file or export target
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StoreError::PermissionDenied { .. }
                | StoreError::DiskFull { .. }
                | StoreError::ReadError { .. }
                | StoreError::WriteError { .. }
                | StoreError::NotFound { .. }
                | StoreError::AtomicWriteFailed { .. }
        )
    }

    /// Check if this error is recoverable
    ///
    /// A corrupt store is not: the caller must refuse to use that path.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::UnknownDuoWord(_)
                | StoreError::UnknownAnkiKey(_)
                | StoreError::InvalidImport { .. }
                | StoreError::DiskFull { .. }
                | StoreError::PermissionDenied { .. }
        )
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::CorruptStore { .. } => {
                Some("The file is not a duo2anki store. Open or create a different store.")
            }
            StoreError::UnknownDuoWord(_) | StoreError::UnknownAnkiKey(_) => {
                Some("List the store again and retry with an existing entry.")
            }
            StoreError::InvalidImport { .. } => Some(
                "Expected a JSON document with a 'vocab_overview' list of records holding 'word_string'.",
            ),
            StoreError::DiskFull { .. } => Some("Free up disk space and try again."),
            StoreError::PermissionDenied { .. } => {
                Some("Check file and directory permissions. You may need to run with different permissions or change ownership.")
            }
            StoreError::WriteError { .. } | StoreError::AtomicWriteFailed { .. } => Some(
                "The file on disk may not match the last change. Reopen the store before editing again.",
            ),
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

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = StoreError::from_io(io_err, PathBuf::from("/test/path"));

        assert!(matches!(err, StoreError::PermissionDenied { .. }));
        assert!(err.is_recoverable());
        assert!(err.is_io());
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_not_found_classification() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = StoreError::from_io(io_err, PathBuf::from("/missing/file"));

        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_disk_full_detection() {
        let io_err = io::Error::new(io::ErrorKind::Other, "No space left on device");
        let err = StoreError::from_io(io_err, PathBuf::from("/full/disk"));

        assert!(matches!(err, StoreError::DiskFull { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_read_classification() {
        let io_err = io::Error::new(io::ErrorKind::InvalidData, "invalid UTF-8");
        let err = StoreError::from_read(io_err, PathBuf::from("/words.json"));
        assert!(matches!(err, StoreError::ReadError { .. }));

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::from_read(io_err, PathBuf::from("/words.json"));
        assert!(matches!(err, StoreError::PermissionDenied { .. }));
    }

    #[test]
    fn test_corrupt_store_is_not_recoverable() {
        let err = StoreError::CorruptStore {
            path: PathBuf::from("/data/words.json"),
            details: "expected value at line 1 column 1".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("corrupted"));
        assert!(msg.contains("/data/words.json"));
        assert!(!err.is_recoverable());
        assert!(!err.is_io());
    }

    #[test]
    fn test_unknown_entry_display() {
        let err = StoreError::UnknownDuoWord("perro".to_string());
        assert_eq!(err.to_string(), "Duo word 'perro' doesn't exist");
        assert!(err.is_recoverable());

        let err = StoreError::UnknownAnkiKey(AnkiKey::from("k1"));
        assert_eq!(err.to_string(), "Anki key 'k1' doesn't exist");
    }
}
