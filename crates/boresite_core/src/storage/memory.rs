//! In-process blob storage with an optional byte quota.

use super::{BlobStorage, StorageError, StorageResult};
use std::collections::HashMap;

/// Map-backed storage, mainly for tests and ephemeral sessions.
///
/// When a quota is set, a write that would push the total stored bytes above
/// it fails with `StorageError::QuotaExceeded` and leaves the map unchanged.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStorage {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn set_quota(&mut self, quota_bytes: Option<usize>) {
        self.quota_bytes = quota_bytes;
    }

    /// Returns the raw stored value, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores a raw value without quota checks.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl BlobStorage for MemoryBlobStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota_bytes) = self.quota_bytes {
            let required_bytes = self.used_bytes_excluding(key) + key.len() + value.len();
            if required_bytes > quota_bytes {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    quota_bytes,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
