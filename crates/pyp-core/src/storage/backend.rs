//! State backends
//!
//! A backend stores the serialized state document under the fixed
//! `pypState` key. The store only needs to read and write whole documents,
//! so a backend is a single byte slot.

use std::path::PathBuf;

use super::error::{StorageError, StorageResult};

/// Fixed key the state document is stored under
pub const STORAGE_KEY: &str = "pypState";

/// Persistence capability injected into the `Store`
pub trait StateBackend {
    /// Read the stored document
    ///
    /// Returns `None` when nothing has been stored yet.
    fn read(&self) -> StorageResult<Option<Vec<u8>>>;

    /// Replace the stored document
    fn write(&mut self, bytes: &[u8]) -> StorageResult<()>;

    /// Keep a copy of a document that failed to parse
    ///
    /// Returns where the copy went, if anywhere.
    fn preserve_corrupt(&mut self, _bytes: &[u8]) -> StorageResult<Option<PathBuf>> {
        Ok(None)
    }

    /// Short human-readable description for status output and logs
    fn describe(&self) -> String;
}

/// Backend holding the document in memory
///
/// Used for tests and for sessions that should not touch disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    bytes: Option<Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a document already stored
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }
}

impl StateBackend for MemoryBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.bytes.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> StorageResult<()> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Backend for contexts with no usable storage
///
/// Every read and write fails with `StorageError::Unavailable`.
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> StorageError {
        StorageError::Unavailable {
            backend: self.describe(),
            reason: self.reason.clone(),
        }
    }
}

impl StateBackend for UnavailableBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        Err(self.error())
    }

    fn write(&mut self, _bytes: &[u8]) -> StorageResult<()> {
        Err(self.error())
    }

    fn describe(&self) -> String {
        "unavailable".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_starts_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn test_memory_backend_replaces_document() {
        let mut backend = MemoryBackend::with_bytes(b"{}".to_vec());
        backend.write(b"{\"goals\":[]}").unwrap();
        assert_eq!(backend.read().unwrap().unwrap(), b"{\"goals\":[]}".to_vec());
    }

    #[test]
    fn test_unavailable_backend_always_fails() {
        let mut backend = UnavailableBackend::new("headless");
        assert!(matches!(
            backend.read(),
            Err(StorageError::Unavailable { .. })
        ));
        assert!(backend.write(b"{}").is_err());
        assert!(backend.preserve_corrupt(b"x").unwrap().is_none());
    }
}
