//! Memo snapshot repository.
//!
//! # Responsibility
//! - Serialize the whole memo collection to one JSON array under `posts`.
//! - Decode legacy snapshots (no `id`, loose `date` formats) without loss.
//!
//! # Invariants
//! - The snapshot key and `star` field name stay byte-compatible with
//!   snapshots written by the browser widget.
//! - A JSON `null` payload is treated like an absent snapshot.
//! - One odd record never discards the rest of the array.

use crate::model::memo::Memo;
use crate::repo::kv_store::KeyValueStore;
use crate::repo::{RepoError, RepoResult};
use log::warn;
use serde_json::Value;

/// Fixed key under which the memo snapshot is stored.
pub const SNAPSHOT_KEY: &str = "posts";

/// Whole-collection persistence for memos.
pub trait MemoRepository {
    /// Loads the persisted collection, `None` when nothing is stored.
    fn load_snapshot(&self) -> RepoResult<Option<Vec<Memo>>>;
    /// Replaces the persisted collection.
    fn save_snapshot(&mut self, memos: &[Memo]) -> RepoResult<()>;
}

/// Snapshot repository on top of any `KeyValueStore`.
pub struct KvMemoRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvMemoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> MemoRepository for KvMemoRepository<S> {
    fn load_snapshot(&self) -> RepoResult<Option<Vec<Memo>>> {
        match self.store.get(SNAPSHOT_KEY)? {
            Some(text) => decode_snapshot(&text),
            None => Ok(None),
        }
    }

    fn save_snapshot(&mut self, memos: &[Memo]) -> RepoResult<()> {
        let text = encode_snapshot(memos)?;
        self.store.set(SNAPSHOT_KEY, &text)
    }
}

/// Encodes a collection in the persisted snapshot format.
pub fn encode_snapshot(memos: &[Memo]) -> RepoResult<String> {
    serde_json::to_string(memos).map_err(RepoError::Encode)
}

/// Decodes persisted snapshot text.
///
/// Returns `Ok(None)` for a JSON `null` payload and
/// `RepoError::MalformedSnapshot` when the text is not a JSON array.
/// Array entries that are not objects are skipped; odd field values inside
/// an object are coerced by `Memo`'s deserializer.
pub fn decode_snapshot(text: &str) -> RepoResult<Option<Vec<Memo>>> {
    let Some(records) = serde_json::from_str::<Option<Vec<Value>>>(text)
        .map_err(RepoError::MalformedSnapshot)?
    else {
        return Ok(None);
    };

    let total = records.len();
    let memos: Vec<Memo> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(memo) => Some(memo),
            Err(err) => {
                warn!(
                    "event=snapshot_decode module=repo status=skip index={index} error={err}"
                );
                None
            }
        })
        .collect();
    if memos.len() < total {
        warn!(
            "event=snapshot_decode module=repo status=partial kept={} total={total}",
            memos.len()
        );
    }
    Ok(Some(memos))
}
