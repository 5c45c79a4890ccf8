//! Memo record and its creation timestamp.
//!
//! # Responsibility
//! - Define the canonical memo shape shared by store, projector and board.
//! - Keep the persisted field names (`star`, ISO-8601 `date`) compatible
//!   with snapshots written by the browser widget.
//!
//! # Invariants
//! - `id` is generated once and never reused for another memo.
//! - `date` carries millisecond precision so it survives a text round-trip.
//! - Malformed persisted dates are kept verbatim, never silently replaced.
//! - Decoding one record never fails on field values: odd `date`, `title`,
//!   `content`, `star` or `id` values are coerced instead of rejected.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a memo.
pub type MemoId = Uuid;

/// Creation timestamp of a memo as found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoDate {
    /// Parsed instant, truncated to milliseconds.
    Valid(DateTime<Utc>),
    /// Raw persisted text that no supported format could parse.
    Malformed(String),
}

impl MemoDate {
    /// Wraps an instant, dropping sub-millisecond precision.
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self::Valid(instant.trunc_subsecs(3))
    }

    /// Parses persisted date text.
    ///
    /// Accepted forms, in order:
    /// - RFC 3339 / ISO-8601 with offset (`2024-03-01T09:30:00.000Z`).
    /// - Bare calendar date (`2024-03-01`), read as UTC midnight.
    ///
    /// Anything else becomes `MemoDate::Malformed` with the input kept as-is.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::from_instant(parsed.with_timezone(&Utc));
        }
        if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
                return Self::Valid(midnight.and_utc());
            }
        }
        Self::Malformed(text.to_string())
    }

    /// Builds a date from epoch milliseconds.
    pub fn from_epoch_millis(millis: i64) -> Self {
        match DateTime::from_timestamp_millis(millis) {
            Some(instant) => Self::Valid(instant),
            None => Self::Malformed(millis.to_string()),
        }
    }

    /// Returns the instant when the date is valid.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(instant) => Some(*instant),
            Self::Malformed(_) => None,
        }
    }

    /// Returns whether the persisted value could not be parsed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Orders newest first; malformed dates go after every valid one and
    /// compare equal among themselves.
    pub fn cmp_newest_first(&self, other: &Self) -> Ordering {
        match (self.instant(), other.instant()) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl Display for MemoDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid(instant) => {
                write!(f, "{}", instant.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Malformed(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for MemoDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MemoDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

impl MemoDate {
    /// Reads any stored JSON value. Text is parsed, integers are epoch
    /// milliseconds, everything else is kept as its JSON text.
    fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => Self::parse(&text),
            Value::Number(number) => match number.as_i64() {
                Some(millis) => Self::from_epoch_millis(millis),
                None => Self::Malformed(number.to_string()),
            },
            other => Self::Malformed(other.to_string()),
        }
    }

    fn missing() -> Self {
        Self::Malformed(String::new())
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

// Truthiness of whatever the widget stored, so `1` or `"yes"` stay starred.
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Null => false,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

// Unreadable ids become nil; the store re-keys nil ids on load.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MemoId, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Uuid::parse_str(&text).unwrap_or_else(|_| Uuid::nil()),
        _ => Uuid::nil(),
    })
}

/// One user memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// Stable id. Legacy snapshots have none; one is generated on read.
    #[serde(default = "Uuid::new_v4", deserialize_with = "lenient_id")]
    pub id: MemoId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    /// Creation time, preserved across edits.
    #[serde(default = "MemoDate::missing")]
    pub date: MemoDate,
    /// Serialized as `star` to match the legacy snapshot schema.
    #[serde(rename = "star", default, deserialize_with = "lenient_flag")]
    pub starred: bool,
}

impl Memo {
    /// Creates an unstarred memo with a generated id.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            date: MemoDate::from_instant(created_at),
            starred: false,
        }
    }

    /// Replaces the user-editable text. `date` and `starred` are untouched.
    pub fn set_text(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
    }

    /// Flips the star flag and returns the new value.
    pub fn toggle_star(&mut self) -> bool {
        self.starred = !self.starred;
        self.starred
    }
}
