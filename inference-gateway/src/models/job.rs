use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of one generation job. Jobs have no local persistence; the id
/// alone addresses both the staged input and the result object through the
/// deterministic key convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derives the id from an object key or `s3://` URI by taking the
    /// basename and dropping everything after the first dot.
    pub fn from_object_key(key: &str) -> Result<Self, ParseJobIdError> {
        let basename = key.rsplit('/').next().unwrap_or(key);
        let stem = basename.split('.').next().unwrap_or(basename);
        stem.parse()
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for JobId {
    type Err = ParseJobIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ParseJobIdError(s.to_string()))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error)]
#[error("malformed task id: {0}")]
pub struct ParseJobIdError(String);
