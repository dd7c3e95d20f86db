//! Storage layer
//!
//! Handles persistence of the state document.
//!
//! ## Architecture
//!
//! - **StateBackend**: a single byte slot holding the serialized document
//! - **FileBackend**: JSON file in the data directory, written atomically
//! - **MemoryBackend** / **UnavailableBackend**: tests and storage-less contexts
//!
//! The store never surfaces these errors to the user; it logs them and
//! degrades to defaults or a no-op.

pub mod backend;
pub mod error;
pub mod file;

pub use backend::{MemoryBackend, StateBackend, UnavailableBackend, STORAGE_KEY};
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
