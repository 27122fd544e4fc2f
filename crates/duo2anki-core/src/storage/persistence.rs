//! Word store persistence
//!
//! Handles creating, loading and saving the JSON document behind a store.
//! Saves use atomic writes (write to temp file, then rename) so the
//! document is never left half-written.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{StoreError, StoreResult};
use crate::models::Dataset;

/// Persistence handler for one store file
#[derive(Debug, Clone)]
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the document exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the backing file and write the empty template into it
    ///
    /// The file is created exclusively: if something else creates it
    /// first, this fails with `PermissionDenied` instead of clobbering it.
    pub fn create(&self) -> StoreResult<Dataset> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::from_io(e, parent.to_path_buf()))?;
        }

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StoreError::PermissionDenied {
                    path: self.path.clone(),
                    source: e,
                },
                _ => StoreError::from_io(e, self.path.clone()),
            })?;

        let dataset = Dataset::template();
        self.save(&dataset)?;
        Ok(dataset)
    }

    /// Load and parse the document
    ///
    /// Anything that is not UTF-8 JSON of the store shape is `CorruptStore`.
    pub fn load(&self) -> StoreResult<Dataset> {
        let bytes = fs::read(&self.path).map_err(|e| StoreError::from_read(e, self.path.clone()))?;

        serde_json::from_slice(&bytes).map_err(|e| StoreError::CorruptStore {
            path: self.path.clone(),
            details: e.to_string(),
        })
    }

    /// Rewrite the whole document
    pub fn save(&self, dataset: &Dataset) -> StoreResult<()> {
        let bytes = serde_json::to_vec(dataset)?;
        atomic_write(&self.path, &bytes)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Saved store");
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::from_io(e, parent.to_path_buf()))?;
    }

    let temp_path = temp_path_for(path);

    let mut file =
        File::create(&temp_path).map_err(|e| StoreError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StoreError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StoreError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        StoreError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source,
        }
    })
}

/// Sibling temp file: `words.json` -> `words.json.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
