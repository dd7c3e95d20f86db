//! File-based state persistence
//!
//! Stores the state document as JSON in the data directory.
//! Uses atomic writes (write to temp file, then rename) to prevent corruption.
//!
//! Storage location: `~/.local/share/pyp/` (configurable via `Config`)
//!
//! Files:
//! - `pypState.json` - The state document
//! - `pypState.json.corrupt.backup` - Last document that failed to parse

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::backend::{StateBackend, STORAGE_KEY};
use super::error::{StorageError, StorageResult};
use crate::config::Config;

/// Backend storing the document in a single JSON file
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Store the document in `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir
                .as_ref()
                .join(format!("{}.json", STORAGE_KEY)),
        }
    }

    /// Store the document where the configuration says
    pub fn from_config(config: &Config) -> Self {
        Self {
            path: config.state_path(),
        }
    }

    /// Path of the state document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path a corrupt document is copied to
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".corrupt.backup");
        PathBuf::from(name)
    }
}

impl StateBackend for FileBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from_read_io(e, self.path.clone())),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> StorageResult<()> {
        atomic_write(&self.path, bytes)
    }

    fn preserve_corrupt(&mut self, bytes: &[u8]) -> StorageResult<Option<PathBuf>> {
        let backup = self.backup_path();
        atomic_write(&backup, bytes)?;
        Ok(Some(backup))
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_write_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_write_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_write_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path());

        assert!(!backend.path().exists());
        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(temp_dir.path());

        backend.write(b"{\"goals\":[\"rest\"]}").unwrap();
        assert!(backend.path().exists());
        assert!(backend.path().ends_with("pypState.json"));
        assert_eq!(
            backend.read().unwrap().unwrap(),
            b"{\"goals\":[\"rest\"]}".to_vec()
        );

        // No temp file left behind
        assert!(!backend.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_write_replaces_previous_document() {
        let temp_dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(temp_dir.path());

        backend.write(b"first").unwrap();
        backend.write(b"second").unwrap();
        assert_eq!(backend.read().unwrap().unwrap(), b"second".to_vec());
        assert_eq!(fs::metadata(backend.path()).unwrap().len(), 6);
    }

    #[test]
    fn test_preserve_corrupt_writes_backup() {
        let temp_dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(temp_dir.path());

        let backup = backend.preserve_corrupt(b"{not json").unwrap().unwrap();
        assert!(backup.ends_with("pypState.json.corrupt.backup"));
        assert_eq!(fs::read(&backup).unwrap(), b"{not json".to_vec());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("file.txt");

        atomic_write(&nested_path, b"test data").unwrap();

        assert!(nested_path.exists());
        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the data directory should be
        let blocker = temp_dir.path().join("blocked");
        fs::write(&blocker, b"").unwrap();

        let mut backend = FileBackend::new(blocker.join("data"));
        assert!(backend.write(b"{}").is_err());
    }
}
