//! SQLite file that holds the memo key-value table.
//!
//! # Responsibility
//! - Open the memo database and bring its schema to the version this build
//!   understands before any snapshot is read.
//! - Report open, migration and version failures with the location and
//!   migration they concern.
//!
//! # Invariants
//! - `PRAGMA user_version` equals the last applied migration.
//! - A database written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Table holding one row per stored key; the memo snapshot lives under `posts`.
pub const KV_TABLE: &str = "kv_entries";

/// Location label used for in-memory databases.
pub const IN_MEMORY_LOCATION: &str = ":memory:";

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or preparing the memo database.
#[derive(Debug)]
pub enum DbError {
    /// The file could not be opened or created.
    Open {
        location: String,
        source: rusqlite::Error,
    },
    /// A migration statement failed; its transaction was rolled back.
    Migration { version: u32, source: rusqlite::Error },
    /// The file was migrated by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// Any other statement (pragmas, version reads).
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "cannot open memo database at {location}: {source}")
            }
            Self::Migration { version, source } => {
                write!(f, "memo schema migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "memo database uses schema {found} but this build only knows up to {supported}; upgrade memo"
            ),
            Self::Sqlite(err) => write!(f, "memo database error: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
