//! Core library for the task tracker CLI.
//!
//! The [`TaskStore`] owns durable CRUD over the task collection: it loads
//! the persisted tasks through an injected [`Storage`], applies one
//! mutation, assigns ids, stamps timestamps, and writes the whole
//! collection back. Argument parsing and console output live in the binary.

mod storage;
mod task;

use std::str::FromStr;

use chrono::Utc;
use log::info;
use thiserror::Error;

pub use crate::storage::{JsonFileStorage, LoadOutcome, Storage};
pub use crate::task::{Status, Task};

/// Failures surfaced by store operations.
///
/// A missing or unreadable backing file is deliberately not in here: both
/// degrade to an empty collection (see [`TaskStore`]).
#[derive(Error, Debug)]
pub enum Error {
    /// The supplied id matches no task; the operation made no change.
    #[error("Task not found (ID: {0})")]
    TaskNotFound(u32),
    /// A status string outside of todo, in-progress and done.
    #[error("'{0}' is not a valid status (expected todo, in-progress or done)")]
    InvalidStatus(String),
    /// Filesystem failure other than a missing backing file.
    #[error("Cannot access the task file: {0}")]
    Storage(#[from] std::io::Error),
    /// The collection could not be encoded for writing.
    #[error("Cannot serialize the task collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Which tasks [`TaskStore::list`] should return.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Every task, regardless of status.
    #[default]
    All,
    /// Only tasks whose status matches exactly.
    Status(Status),
}

impl Filter {
    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => task.status == status,
        }
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Status)
        }
    }
}

/// Durable CRUD over the task collection.
///
/// Every operation is a complete read-modify-write cycle: the collection is
/// loaded from storage, mutated in memory, and written back in full. The
/// process holds no state between invocations, and there is no cross-process
/// locking; concurrent runs race with last-writer-wins semantics.
pub struct TaskStore<S: Storage> {
    storage: S,
}

impl<S: Storage> TaskStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Adds a task with the next free id and returns that id.
    ///
    /// The id is `max(existing ids) + 1`, or 1 for an empty collection, so
    /// ids deleted in the middle of the sequence are never handed out again.
    /// The description is stored as given; even an empty string is accepted.
    pub fn add(&self, description: String) -> Result<u32, Error> {
        let mut tasks = self.collection()?;
        let id = next_id(&tasks);
        tasks.push(Task::new(id, description, Utc::now()));
        self.storage.save(&tasks)?;
        Ok(id)
    }

    /// Replaces the description of the task with the given id.
    pub fn update_description(&self, id: u32, description: String) -> Result<(), Error> {
        let mut tasks = self.collection()?;
        let index = find_index(&tasks, id).ok_or(Error::TaskNotFound(id))?;
        tasks[index].description = description;
        tasks[index].touch();
        self.storage.save(&tasks)
    }

    /// Replaces the status of the task with the given id.
    pub fn update_status(&self, id: u32, status: Status) -> Result<(), Error> {
        let mut tasks = self.collection()?;
        let index = find_index(&tasks, id).ok_or(Error::TaskNotFound(id))?;
        tasks[index].status = status;
        tasks[index].touch();
        self.storage.save(&tasks)
    }

    /// Removes the task with the given id, keeping the relative order of
    /// the remaining tasks.
    pub fn delete(&self, id: u32) -> Result<(), Error> {
        let mut tasks = self.collection()?;
        let index = find_index(&tasks, id).ok_or(Error::TaskNotFound(id))?;
        tasks.remove(index);
        self.storage.save(&tasks)
    }

    /// Returns the tasks matching `filter`, in collection order.
    ///
    /// Read-only: never writes the backing store, and is recomputed from a
    /// fresh load on every call.
    pub fn list(&self, filter: Filter) -> Result<Vec<Task>, Error> {
        let tasks = self.collection()?;
        Ok(tasks.into_iter().filter(|t| filter.matches(t)).collect())
    }

    /// Loads the collection, degrading a missing or unreadable backing file
    /// to an empty collection with a console notice. Note that the
    /// unreadable case means any malformed existing content is discarded on
    /// the next write.
    fn collection(&self) -> Result<Vec<Task>, Error> {
        match self.storage.load()? {
            LoadOutcome::Loaded(tasks) => Ok(tasks),
            LoadOutcome::Missing => {
                info!("backing file missing, starting from an empty collection");
                println!("No data file found.");
                Ok(Vec::new())
            }
            LoadOutcome::Unreadable => {
                info!("backing file unreadable, starting from an empty collection");
                println!("No data in file");
                Ok(Vec::new())
            }
        }
    }
}

/// Position of the task with the given id, if present. Ids are unique, so
/// the first match is the only one.
fn find_index(tasks: &[Task], id: u32) -> Option<usize> {
    tasks.iter().position(|task| task.id == id)
}

fn next_id(tasks: &[Task]) -> u32 {
    tasks.iter().map(|task| task.id).max().map_or(1, |max| max + 1)
}
