//! Memo board controller.
//!
//! # Responsibility
//! - Apply user intents to the memo store and the board session state.
//! - Produce `BoardView` renders from the projected collection.
//!
//! # Invariants
//! - Opening the composer always clears the edit target.
//! - A save never creates a memo while an edit target is set, even when the
//!   target has since been deleted.
//! - The editor closes only after a save succeeded.

use crate::model::memo::MemoId;
use crate::presentation::view_model::{BoardView, EditorView, MemoCard, EMPTY_MESSAGE};
use crate::repo::memo_repo::MemoRepository;
use crate::repo::RepoResult;
use crate::service::clock::{Clock, SystemClock};
use crate::service::memo_store::MemoStore;
use crate::view::projector::{project, SortKey};
use log::debug;

/// User intent accepted by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Open the composer for a new memo, or close any open editor.
    ToggleComposer,
    /// Dismiss the editor without saving.
    CloseEditor,
    /// Save editor text: update the edit target or create a new memo.
    Submit { title: String, content: String },
    /// Open the editor on an existing memo.
    Edit(MemoId),
    Delete(MemoId),
    ToggleStar(MemoId),
    Sort(SortKey),
}

/// Editor session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Composing,
    Editing(MemoId),
}

/// Observable result of one dispatched intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created(MemoId),
    Updated(MemoId),
    Deleted(MemoId),
    Starred { id: MemoId, starred: bool },
    EditorChanged(EditorState),
    SortChanged(SortKey),
    /// Intent referenced a memo that no longer exists.
    Ignored,
}

/// Memo store plus the UI session state around it.
pub struct MemoBoard<R: MemoRepository, C: Clock = SystemClock> {
    store: MemoStore<R, C>,
    sort_key: SortKey,
    editor: EditorState,
}

impl<R: MemoRepository, C: Clock> MemoBoard<R, C> {
    /// Wraps a loaded store with the default sort (`SortKey::Date`) and a
    /// closed editor.
    pub fn new(store: MemoStore<R, C>) -> Self {
        Self {
            store,
            sort_key: SortKey::default(),
            editor: EditorState::Closed,
        }
    }

    /// Applies one intent.
    ///
    /// # Errors
    /// - Returns repository write errors from the underlying store.
    pub fn dispatch(&mut self, intent: Intent) -> RepoResult<Outcome> {
        let outcome = match intent {
            Intent::ToggleComposer => {
                self.editor = match self.editor {
                    EditorState::Closed => EditorState::Composing,
                    EditorState::Composing | EditorState::Editing(_) => EditorState::Closed,
                };
                Outcome::EditorChanged(self.editor)
            }
            Intent::CloseEditor => {
                self.editor = EditorState::Closed;
                Outcome::EditorChanged(self.editor)
            }
            Intent::Submit { title, content } => {
                let outcome = match self.editor {
                    EditorState::Editing(id) => self
                        .store
                        .update(id, title, content)?
                        .map_or(Outcome::Ignored, |memo| Outcome::Updated(memo.id)),
                    EditorState::Closed | EditorState::Composing => {
                        Outcome::Created(self.store.create(title, content)?.id)
                    }
                };
                self.editor = EditorState::Closed;
                outcome
            }
            Intent::Edit(id) => {
                if self.store.get(id).is_some() {
                    self.editor = EditorState::Editing(id);
                    Outcome::EditorChanged(self.editor)
                } else {
                    Outcome::Ignored
                }
            }
            Intent::Delete(id) => self
                .store
                .delete(id)?
                .map_or(Outcome::Ignored, |memo| Outcome::Deleted(memo.id)),
            Intent::ToggleStar(id) => self
                .store
                .toggle_star(id)?
                .map_or(Outcome::Ignored, |starred| Outcome::Starred { id, starred }),
            Intent::Sort(sort_key) => {
                self.sort_key = sort_key;
                Outcome::SortChanged(sort_key)
            }
        };

        debug!("event=board_dispatch module=presentation status=ok outcome={outcome:?}");
        Ok(outcome)
    }

    /// Renders the board with cards in the selected sort order.
    pub fn render(&self) -> BoardView {
        let cards = project(self.store.snapshot(), self.sort_key)
            .into_iter()
            .map(MemoCard::from_memo)
            .collect();

        BoardView {
            sort_key: self.sort_key,
            cards,
            empty_message: self.store.is_empty().then_some(EMPTY_MESSAGE),
            editor: self.editor_view(),
        }
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn editor(&self) -> EditorState {
        self.editor
    }

    pub fn store(&self) -> &MemoStore<R, C> {
        &self.store
    }

    pub fn into_store(self) -> MemoStore<R, C> {
        self.store
    }

    fn editor_view(&self) -> EditorView {
        match self.editor {
            EditorState::Closed => EditorView::Closed,
            EditorState::Composing => EditorView::Open {
                target: None,
                title: String::new(),
                content: String::new(),
            },
            // A deleted target still renders an open editor; its save is a no-op.
            EditorState::Editing(id) => {
                let (title, content) = self
                    .store
                    .get(id)
                    .map(|memo| (memo.title.clone(), memo.content.clone()))
                    .unwrap_or_default();
                EditorView::Open {
                    target: Some(id),
                    title,
                    content,
                }
            }
        }
    }
}
