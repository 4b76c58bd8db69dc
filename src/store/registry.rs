//! File-backed registry store
//!
//! The registry is a JSON array of claimed numbers at `<dir>/db.json`.
//! The directory is injected at construction; the store never consults
//! the environment itself. Writes go through a temp file in the same
//! directory followed by a rename, so a crash mid-write leaves the old
//! registry intact rather than a truncated file.
//!
//! Positions handed to [`RegistryStore::delete_at`] refer to the ordering
//! of the preceding read. This is a single-process, sequential-use
//! contract; there is no inter-process locking, and external mutation of
//! the file between a read and the matching write is out of scope beyond
//! the corruption failure mode below.

use crate::records::NumberRecord;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the registry inside its directory
pub const DB_FILE_NAME: &str = "db.json";

/// Errors raised by registry operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create registry directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create registry file {path}: {source}")]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read registry file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write registry file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("corrupt registry file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("position {index} does not exist: registry holds {len} numbers")]
    OutOfRange { index: usize, len: usize },
}

/// The registry of claimed numbers, backed by one JSON file
pub struct RegistryStore {
    dir: PathBuf,
    path: PathBuf,
}

impl RegistryStore {
    /// Creates a store rooted at `dir`. No filesystem access happens
    /// until the first operation.
    pub fn new(dir: PathBuf) -> Self {
        let path = dir.join(DB_FILE_NAME);
        Self { dir, path }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Materializes the registry: creates the directory (and missing
    /// parents) and seeds the file with an empty array if absent.
    ///
    /// Idempotent; an existing file is never touched.
    pub fn ensure_store(&self) -> Result<&Path, StoreError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;
        }

        if !self.path.exists() {
            tracing::info!("creating registry at {}", self.path.display());
            fs::write(&self.path, "[\n]\n").map_err(|source| StoreError::CreateFile {
                path: self.path.clone(),
                source,
            })?;
        }

        Ok(&self.path)
    }

    /// Reads the full registry in claim order.
    pub fn read_all(&self) -> Result<Vec<NumberRecord>, StoreError> {
        self.ensure_store()?;

        let data = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Appends a claimed number at the end of the registry.
    pub fn append(&self, record: &NumberRecord) -> Result<(), StoreError> {
        let mut numbers = self.read_all()?;
        numbers.push(record.clone());
        self.write_back(&numbers)
    }

    /// Removes and returns the number at `index`.
    ///
    /// The bounds check happens before any mutation: an out-of-range
    /// index leaves the file exactly as it was.
    pub fn delete_at(&self, index: usize) -> Result<NumberRecord, StoreError> {
        let mut numbers = self.read_all()?;

        if index >= numbers.len() {
            return Err(StoreError::OutOfRange {
                index,
                len: numbers.len(),
            });
        }

        let removed = numbers.remove(index);
        self.write_back(&numbers)?;
        Ok(removed)
    }

    /// Serializes the full registry and replaces the file atomically:
    /// write a sibling temp file, then rename over the target.
    fn write_back(&self, numbers: &[NumberRecord]) -> Result<(), StoreError> {
        let data = serde_json::to_vec(numbers).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.dir.join(format!("{DB_FILE_NAME}.tmp"));
        fs::write(&tmp, data).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;

        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
