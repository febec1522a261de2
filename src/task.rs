//! The task record and its on-disk representation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A single tracked task.
///
/// Persisted as a JSON object with camelCase field names; the timestamps are
/// stored as fixed-format strings (see [`timestamp`]).
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
pub struct Task {
    pub id: u32,
    pub description: String,
    pub status: Status,
    #[serde(rename = "createdAt", with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in the initial `Todo` status, stamped with `now` for
    /// both timestamps.
    pub fn new(id: u32, description: String, now: DateTime<Utc>) -> Self {
        // The wire format only carries whole seconds; keep the in-memory
        // value at the same precision so a save/load round trip is lossless.
        let now = now.trunc_subsecs(0);
        Self {
            id,
            description,
            status: Status::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes `updated_at` to the current time. Called on every mutation;
    /// `created_at` is never touched after construction.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().trunc_subsecs(0);
    }
}

/// Lifecycle state of a task. Serialized as `todo`, `in-progress` or `done`.
#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// Serde adapter for the backing file's timestamp format,
/// e.g. `13:05:09 08-23-2026`.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%H:%M:%S %m-%d-%Y";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)?;
        Ok(Utc.from_utc_datetime(&naive))
    }
}
