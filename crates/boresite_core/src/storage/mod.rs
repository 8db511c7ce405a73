//! Key/value blob storage backing the project collection.
//!
//! # Responsibility
//! - Provide a local-storage style medium: one string value per key.
//! - Offer a file-backed backend and an in-memory backend.
//!
//! # Invariants
//! - A failed `write` leaves the previous value for that key intact.
//! - `read` of a key that was never written returns `Ok(None)`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod file;
mod memory;

pub use file::FileBlobStorage;
pub use memory::MemoryBlobStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Synchronous whole-value blob medium.
pub trait BlobStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

#[derive(Debug)]
pub enum StorageError {
    Io {
        key: String,
        source: std::io::Error,
    },
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
    InvalidKey(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { key, source } => write!(f, "storage I/O failed for `{key}`: {source}"),
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required_bytes} bytes needed, {quota_bytes} allowed"
            ),
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::QuotaExceeded { .. } | Self::InvalidKey(_) => None,
        }
    }
}
