//! In-memory memo collection synchronized with a snapshot repository.
//!
//! # Responsibility
//! - Own the ordered memo collection and its create/update/delete/star rules.
//! - Write the full collection to the repository after every effective mutation.
//!
//! # Invariants
//! - Collection order is insertion order; only `delete` shrinks it.
//! - `update` touches `title`/`content` only; `date` and `starred` survive.
//! - Operations on an unknown id are no-ops and do not write.
//! - Ids are unique inside a loaded collection.
//!
//! # See also
//! - `crate::view::projector` for display ordering.

use crate::model::memo::{Memo, MemoId};
use crate::repo::memo_repo::MemoRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::clock::{Clock, SystemClock};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use uuid::Uuid;

/// When the store writes the collection back to its repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistPolicy {
    /// Persist after every mutation, including one that empties the collection.
    #[default]
    Always,
    /// Never persist an empty collection, leaving the previous snapshot in
    /// place. Matches snapshots produced by the legacy browser widget.
    SkipEmpty,
}

/// Memo collection plus the repository it mirrors.
pub struct MemoStore<R: MemoRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    policy: PersistPolicy,
    memos: Vec<Memo>,
}

impl<R: MemoRepository> MemoStore<R> {
    /// Loads the persisted collection using the wall clock for new memos.
    ///
    /// See [`MemoStore::load_with_clock`].
    pub fn load(repo: R) -> RepoResult<Self> {
        MemoStore::load_with_clock(repo, SystemClock)
    }
}

impl<R: MemoRepository, C: Clock> MemoStore<R, C> {
    /// Loads the persisted collection.
    ///
    /// An absent or malformed snapshot yields an empty collection; the
    /// malformed case is logged and otherwise ignored.
    ///
    /// # Errors
    /// - Returns repository transport errors (e.g. SQLite read failures).
    pub fn load_with_clock(repo: R, clock: C) -> RepoResult<Self> {
        let memos = match repo.load_snapshot() {
            Ok(Some(memos)) => rekey_duplicate_ids(memos),
            Ok(None) => Vec::new(),
            Err(RepoError::MalformedSnapshot(err)) => {
                warn!(
                    "event=memo_load module=store status=recovered reason=malformed_snapshot error={err}"
                );
                Vec::new()
            }
            Err(err) => {
                error!("event=memo_load module=store status=error error={err}");
                return Err(err);
            }
        };

        info!(
            "event=memo_load module=store status=ok count={} malformed_dates={}",
            memos.len(),
            memos.iter().filter(|memo| memo.date.is_malformed()).count()
        );

        Ok(Self {
            repo,
            clock,
            policy: PersistPolicy::default(),
            memos,
        })
    }

    /// Sets when mutations are written back.
    pub fn with_persist_policy(mut self, policy: PersistPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Appends a new unstarred memo stamped with the current time.
    ///
    /// Empty `title`/`content` are accepted.
    ///
    /// # Errors
    /// - Returns the repository write error. The memo stays in memory.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> RepoResult<Memo> {
        let memo = Memo::new(title, content, self.clock.now());
        self.memos.push(memo.clone());
        self.persist("memo_create", memo.id)?;
        Ok(memo)
    }

    /// Replaces title and content of memo `id`.
    ///
    /// Returns the updated memo, or `None` when `id` is unknown.
    pub fn update(
        &mut self,
        id: MemoId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> RepoResult<Option<Memo>> {
        let Some(memo) = self.memos.iter_mut().find(|memo| memo.id == id) else {
            debug!("event=memo_update module=store status=noop reason=unknown_id memo_id={id}");
            return Ok(None);
        };
        memo.set_text(title, content);
        let updated = memo.clone();
        self.persist("memo_update", id)?;
        Ok(Some(updated))
    }

    /// Removes memo `id` and returns it, or `None` when `id` is unknown.
    pub fn delete(&mut self, id: MemoId) -> RepoResult<Option<Memo>> {
        let Some(index) = self.memos.iter().position(|memo| memo.id == id) else {
            debug!("event=memo_delete module=store status=noop reason=unknown_id memo_id={id}");
            return Ok(None);
        };
        let removed = self.memos.remove(index);
        self.persist("memo_delete", id)?;
        Ok(Some(removed))
    }

    /// Flips the star flag of memo `id`.
    ///
    /// Returns the new flag value, or `None` when `id` is unknown.
    pub fn toggle_star(&mut self, id: MemoId) -> RepoResult<Option<bool>> {
        let Some(memo) = self.memos.iter_mut().find(|memo| memo.id == id) else {
            debug!("event=memo_star module=store status=noop reason=unknown_id memo_id={id}");
            return Ok(None);
        };
        let starred = memo.toggle_star();
        self.persist("memo_star", id)?;
        Ok(Some(starred))
    }

    /// Full ordered collection, as written to the repository.
    pub fn snapshot(&self) -> &[Memo] {
        &self.memos
    }

    pub fn get(&self, id: MemoId) -> Option<&Memo> {
        self.memos.iter().find(|memo| memo.id == id)
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    fn persist(&mut self, event: &'static str, memo_id: MemoId) -> RepoResult<()> {
        if self.memos.is_empty() && self.policy == PersistPolicy::SkipEmpty {
            debug!(
                "event={event} module=store status=ok persisted=false reason=empty_collection memo_id={memo_id}"
            );
            return Ok(());
        }

        match self.repo.save_snapshot(&self.memos) {
            Ok(()) => {
                info!(
                    "event={event} module=store status=ok memo_id={memo_id} count={}",
                    self.memos.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={event} module=store status=error error_code=persist_failed memo_id={memo_id} error={err}"
                );
                Err(err)
            }
        }
    }
}

/// Assigns fresh ids to nil or repeated ids, keeping the first occurrence.
fn rekey_duplicate_ids(mut memos: Vec<Memo>) -> Vec<Memo> {
    let mut seen = HashSet::with_capacity(memos.len());
    for memo in &mut memos {
        if memo.id.is_nil() || !seen.insert(memo.id) {
            let previous = memo.id;
            memo.id = Uuid::new_v4();
            seen.insert(memo.id);
            warn!(
                "event=memo_load module=store status=rekeyed previous_id={previous} memo_id={}",
                memo.id
            );
        }
    }
    memos
}
