//! Persistence seam: loading and saving the canonical set.
//!
//! The engine itself is storage-agnostic — it operates purely on
//! in-memory person sets. Callers inject a [`Repository`] (capability set
//! {load, save}) and own when persistence happens. The bundled
//! [`JsonFileRepository`] stores a pretty-printed person list and writes
//! atomically (temp file + rename) so a crash mid-save never truncates
//! the tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::model::Person;
use crate::set::PersonSet;

/// Failures at the persistence seam.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("failed to read tree file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write tree file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("tree file {path} is not a person list: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load/save capability over a serializable list of person records.
pub trait Repository {
    /// Load the last stored set, or the empty set if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] for unreadable or malformed storage.
    fn load(&self) -> Result<PersonSet, RepoError>;

    /// Durably store the given set.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] when the store cannot be written.
    fn save(&self, set: &PersonSet) -> Result<(), RepoError>;
}

/// JSON-file-backed repository.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Repository for JsonFileRepository {
    fn load(&self) -> Result<PersonSet, RepoError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no tree file yet; loading empty set");
            return Ok(PersonSet::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| RepoError::Read {
            path: self.path.clone(),
            source,
        })?;
        let people: Vec<Person> =
            serde_json::from_str(&content).map_err(|source| RepoError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        Ok(PersonSet::from_people(people))
    }

    fn save(&self, set: &PersonSet) -> Result<(), RepoError> {
        let write_err = |source| RepoError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(&set.to_people()).unwrap_or_default();

        // Atomic replace: a crash mid-write leaves the previous file intact.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), people = set.len(), "saved tree file");
        Ok(())
    }
}
