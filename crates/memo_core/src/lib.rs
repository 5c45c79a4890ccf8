//! Core domain logic for the memo board.
//! This crate owns the memo model, its persistence boundary and the
//! session state behind any presentation layer.

pub mod db;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memo::{Memo, MemoDate, MemoId};
pub use presentation::board::{EditorState, Intent, MemoBoard, Outcome};
pub use presentation::view_model::{BoardView, EditorView, MemoCard};
pub use repo::kv_store::{InMemoryKeyValueStore, KeyValueStore, SqliteKeyValueStore};
pub use repo::memo_repo::{KvMemoRepository, MemoRepository, SNAPSHOT_KEY};
pub use repo::{RepoError, RepoResult};
pub use service::clock::{Clock, SystemClock};
pub use service::memo_store::{MemoStore, PersistPolicy};
pub use view::projector::{project, SortKey};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
