//! File-backed blob storage.
//!
//! # Responsibility
//! - Map each storage key to `<dir>/<key>.json`.
//! - Replace values atomically via temp file + rename.
//!
//! # Invariants
//! - Keys are restricted to `[A-Za-z0-9_.-]` so they cannot escape `dir`.
//! - A crash mid-write never leaves a truncated value under the final name.

use super::{BlobStorage, StorageError, StorageResult};
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

static STORAGE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("valid storage key regex"));

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Directory of one-file-per-key blobs.
#[derive(Debug, Clone)]
pub struct FileBlobStorage {
    dir: PathBuf,
}

impl FileBlobStorage {
    /// Opens (and creates if needed) a storage directory.
    ///
    /// # Side effects
    /// - Creates `dir` recursively.
    /// - Emits `storage_open` logging events with duration and status.
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let started_at = Instant::now();
        let dir = dir.as_ref().to_path_buf();
        info!("event=storage_open module=storage status=start mode=file");

        if let Err(err) = fs::create_dir_all(&dir) {
            error!(
                "event=storage_open module=storage status=error mode=file duration_ms={} error_code=create_dir_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(StorageError::Io {
                key: dir.display().to_string(),
                source: err,
            });
        }

        info!(
            "event=storage_open module=storage status=ok mode=file duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file that holds the value for `key`.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        if !STORAGE_KEY_RE.is_match(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.{VALUE_EXTENSION}")))
    }
}

impl BlobStorage for FileBlobStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io {
                key: key.to_string(),
                source: err,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let temp_path = self.dir.join(format!("{key}.{TEMP_EXTENSION}"));
        let io_error = |source: std::io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };

        let mut file = fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(value.as_bytes()).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        drop(file);

        if let Err(err) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(io_error(err));
        }
        Ok(())
    }
}
