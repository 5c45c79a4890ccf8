//! Display ordering for memos.
//!
//! # Responsibility
//! - Map a `SortKey` to a display order over a borrowed collection.
//!
//! # Invariants
//! - Projection never mutates or reorders its input slice.
//! - Sorting is stable: ties keep collection order.
//! - Malformed dates order after every valid date.

use crate::model::memo::Memo;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sort selection offered by the memo board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Collated title, ascending.
    Title,
    /// Newest first.
    #[default]
    Date,
    /// Starred first, newest first inside each group.
    Star,
    /// Collection order.
    Insertion,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
            Self::Star => "star",
            Self::Insertion => "none",
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown keys select `SortKey::Insertion`; parsing never fails.
impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "title" => Self::Title,
            "date" => Self::Date,
            "star" | "starred" => Self::Star,
            _ => Self::Insertion,
        })
    }
}

/// Returns `memos` in display order for `sort_key`.
pub fn project(memos: &[Memo], sort_key: SortKey) -> Vec<&Memo> {
    let mut ordered: Vec<&Memo> = memos.iter().collect();
    match sort_key {
        SortKey::Title => ordered.sort_by(|left, right| collate_titles(&left.title, &right.title)),
        SortKey::Date => ordered.sort_by(|left, right| left.date.cmp_newest_first(&right.date)),
        SortKey::Star => ordered.sort_by(|left, right| {
            right
                .starred
                .cmp(&left.starred)
                .then_with(|| left.date.cmp_newest_first(&right.date))
        }),
        SortKey::Insertion => {}
    }
    ordered
}

/// Compares titles the way a root-locale collator does, in three levels:
/// base letters (accents and case ignored), then accents (unaccented first),
/// then case (lowercase first).
///
/// `"éclair" < "egg" < "Émile"` and `"apple" < "Apple"`.
pub fn collate_titles(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| accented_letters(left).cmp(accented_letters(right)))
        .then_with(|| right.nfd().cmp(left.nfd()))
}

fn base_letters(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
}

fn accented_letters(title: &str) -> impl Iterator<Item = char> + '_ {
    title.nfd().flat_map(char::to_lowercase)
}
