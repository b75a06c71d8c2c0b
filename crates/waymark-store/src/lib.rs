//! File-backed candidate cache.
//!
//! The store is a total `id -> Candidate` mapping with no ordering
//! semantics. `load` deliberately never fails outward: a missing, unreadable,
//! or corrupt cache degrades to "no known candidates" so the operator is
//! never blocked by stale local state. Writes and explicit imports do report
//! errors.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use waymark_core::Candidate;

/// The id-keyed candidate mapping as held in memory.
pub type CandidateMap = HashMap<String, Candidate>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write cache at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove cache at {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Candidate cache bound to a filesystem path.
#[derive(Debug, Clone)]
pub struct CandidateStore {
    path: PathBuf,
}

impl CandidateStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached mapping. Any failure — file absent, unreadable,
    /// malformed JSON — yields an empty map and a warning.
    #[must_use]
    pub fn load(&self) -> CandidateMap {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CandidateMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cache unreadable, starting empty");
                return CandidateMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cache corrupt, starting empty");
                CandidateMap::new()
            }
        }
    }

    /// Persists the mapping, replacing whatever was on disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] on any I/O failure.
    pub fn save(&self, map: &CandidateMap) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Removes the cache file. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Remove`] on any I/O failure other than the file
    /// already being gone.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Serializes the current cache as a standalone JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Malformed`] if serialization fails.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.load())?)
    }

    /// Validates an exported document and wholesale-replaces the cache with
    /// it. Unlike [`CandidateStore::load`], a malformed document is an error
    /// here: an explicit import should never silently wipe the cache.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Malformed`] on invalid JSON or
    /// [`StoreError::Write`] if persisting the imported mapping fails.
    pub fn import_json(&self, document: &str) -> Result<CandidateMap, StoreError> {
        let map: CandidateMap = serde_json::from_str(document)?;
        self.save(&map)?;
        Ok(map)
    }
}
