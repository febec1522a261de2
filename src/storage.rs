//! Pluggable persistence for the task collection.
//!
//! The store operations only ever see the [`Storage`] trait, so tests can
//! swap the real file for an in-memory fake.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::Error;
use crate::task::Task;

/// What reading the backing store produced.
///
/// The two degraded outcomes both behave as an empty collection, but they
/// are reported separately so the caller can tell the user which one it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store existed and parsed as a task collection.
    Loaded(Vec<Task>),
    /// No backing file exists yet.
    Missing,
    /// The backing file exists but does not hold a well-formed collection.
    Unreadable,
}

/// Durable source of truth for the task collection.
pub trait Storage {
    /// Reads the full collection from the backing store.
    fn load(&self) -> Result<LoadOutcome, Error>;

    /// Replaces the backing store wholesale with exactly `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<(), Error>;
}

/// Stores the collection as a JSON array in a single file, rewriting the
/// whole file on every save.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<LoadOutcome, Error> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
            Err(err) => return Err(Error::Storage(err)),
        };
        // Anything that is not a task array (including an empty or
        // half-written file) degrades to Unreadable rather than failing.
        match serde_json::from_str(&contents) {
            Ok(tasks) => Ok(LoadOutcome::Loaded(tasks)),
            Err(_) => Ok(LoadOutcome::Unreadable),
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), Error> {
        let json = serde_json::to_string(tasks)?;
        // Write a sibling file first and rename it into place, so a crash
        // mid-write never leaves a truncated collection at the real path.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
