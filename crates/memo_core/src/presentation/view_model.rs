//! Render-ready memo board views.

use crate::model::memo::{Memo, MemoDate, MemoId};
use crate::view::projector::SortKey;
use chrono::{Local, TimeZone};
use std::fmt::Display;

/// Shown instead of cards when the collection is empty.
pub const EMPTY_MESSAGE: &str = "No memos yet.";
/// Display text for a date that could not be parsed.
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// One memo as displayed in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoCard {
    pub id: MemoId,
    pub title: String,
    pub content: String,
    pub starred: bool,
    /// Local calendar date (`YYYY-MM-DD`) or `INVALID_DATE_LABEL`.
    pub display_date: String,
}

impl MemoCard {
    pub fn from_memo(memo: &Memo) -> Self {
        Self::from_memo_in(memo, &Local)
    }

    /// Builds a card formatting the date in `tz`.
    pub fn from_memo_in<Tz: TimeZone>(memo: &Memo, tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        Self {
            id: memo.id,
            title: memo.title.clone(),
            content: memo.content.clone(),
            starred: memo.starred,
            display_date: display_date_in(&memo.date, tz),
        }
    }
}

/// Editor (compose/edit dialog) as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorView {
    Closed,
    Open {
        /// `None` when composing a new memo.
        target: Option<MemoId>,
        title: String,
        content: String,
    },
}

/// Complete board render output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub sort_key: SortKey,
    pub cards: Vec<MemoCard>,
    /// Set only when there are no memos at all.
    pub empty_message: Option<&'static str>,
    pub editor: EditorView,
}

/// Formats a memo date as a calendar day in `tz`.
pub fn display_date_in<Tz: TimeZone>(date: &MemoDate, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match date.instant() {
        Some(instant) => instant.with_timezone(tz).format("%Y-%m-%d").to_string(),
        None => INVALID_DATE_LABEL.to_string(),
    }
}
