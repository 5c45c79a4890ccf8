//! Persistence boundary: key-value stores and the memo snapshot repository.
//!
//! # Responsibility
//! - Define the narrow `get`/`set` contract the memo store persists through.
//! - Own the JSON snapshot format stored under the fixed snapshot key.
//!
//! # Invariants
//! - Repositories always read and write the full collection, never a delta.
//! - Decode failures are reported as `RepoError::MalformedSnapshot`, so the
//!   caller decides whether to recover.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv_store;
pub mod memo_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error raised by key-value stores and snapshot repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection has not been through `open_db`/`open_db_in_memory`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// Stored snapshot text is not a valid memo array.
    MalformedSnapshot(serde_json::Error),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
    /// Write rejected because the store's byte quota would be exceeded.
    QuotaExceeded { limit_bytes: usize, needed_bytes: usize },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db first"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MalformedSnapshot(err) => write!(f, "malformed memo snapshot: {err}"),
            Self::Encode(err) => write!(f, "failed to encode memo snapshot: {err}"),
            Self::QuotaExceeded {
                limit_bytes,
                needed_bytes,
            } => write!(
                f,
                "storage quota exceeded: {needed_bytes} bytes needed, limit is {limit_bytes}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MalformedSnapshot(err) | Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
