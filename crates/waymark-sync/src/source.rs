//! Nomination source abstraction.
//!
//! The host application owns the live nomination list; this crate only sees
//! it through [`NominationSource`], so host-specific extraction stays
//! outside the engine.

use std::path::{Path, PathBuf};

use thiserror::Error;

use waymark_core::Nomination;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read nominations from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("nomination document at {path} is not a valid JSON array: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only view of the host application's current nomination list.
///
/// May legitimately return an empty list when the relevant host view is not
/// rendered; the sync pass treats that as an operator notice, not an error.
pub trait NominationSource {
    /// # Errors
    ///
    /// Returns [`SourceError`] when the backing source exists but cannot be
    /// read or parsed.
    fn current_nominations(&self) -> Result<Vec<Nomination>, SourceError>;
}

/// Source backed by a JSON file holding an array of nominations, as exported
/// from the host application.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NominationSource for JsonFileSource {
    fn current_nominations(&self) -> Result<Vec<Nomination>, SourceError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SourceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Fixed in-memory source, for tests and scripted runs.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub nominations: Vec<Nomination>,
}

impl NominationSource for StaticSource {
    fn current_nominations(&self) -> Result<Vec<Nomination>, SourceError> {
        Ok(self.nominations.clone())
    }
}
