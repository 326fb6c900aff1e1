//! Data models for notekeep
//!
//! Defines the core data structures: Note, NoteId, NotePatch and the
//! `Outcome` returned by every store mutation.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, unique note identifier
///
/// New ids are random v4 UUIDs. Ids read from storage are kept verbatim,
/// so notes written by older tools with numeric ids keep their identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Allocate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for compact listings
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A text note filed under one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "StoredNote")]
pub struct Note {
    /// Unique identifier, fixed at creation
    pub id: NoteId,
    /// Note title, never empty after trimming
    pub title: String,
    /// Note body content
    pub content: String,
    /// Category label
    pub category: String,
    /// When this note was created
    pub created_at: DateTime<Utc>,
    /// When this note was last changed
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note stamped with the current time
    ///
    /// The caller is responsible for trimming and validating `title`.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::generate(),
            title: title.into(),
            content: content.into(),
            category: category.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance `updated_at`
    ///
    /// Always moves strictly forward, even when the clock has not ticked
    /// since the previous stamp.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    /// Move this note to another category
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.touch();
    }
}

/// On-disk shape of a note
///
/// Tolerates records written without an id or timestamps; anything missing
/// is filled in when the record is read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredNote {
    #[serde(default)]
    id: Option<serde_json::Value>,
    title: String,
    content: String,
    category: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<StoredNote> for Note {
    fn from(stored: StoredNote) -> Self {
        let now = Utc::now();
        let id = match stored.id {
            Some(serde_json::Value::String(s)) if !s.is_empty() => NoteId(s),
            Some(serde_json::Value::Number(n)) => NoteId(n.to_string()),
            _ => NoteId::generate(),
        };
        Self {
            id,
            title: stored.title,
            content: stored.content,
            category: stored.category,
            created_at: stored.created_at.unwrap_or(now),
            updated_at: stored.updated_at.unwrap_or(now),
        }
    }
}

/// Partial update for a note
///
/// Each field is independently optional; `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

impl NotePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category.is_none()
    }
}

/// Why a mutation left state unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Title was empty or whitespace only
    EmptyTitle,
    /// No note with the given id
    NotFound,
    /// Category name was empty or whitespace only
    EmptyName,
    /// Category already exists
    Duplicate,
    /// Refused to remove the only remaining category
    LastCategory,
    /// No category with the given name
    UnknownCategory,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Reason::EmptyTitle => "title is empty",
            Reason::NotFound => "no such note",
            Reason::EmptyName => "category name is empty",
            Reason::Duplicate => "category already exists",
            Reason::LastCategory => "cannot delete the last category",
            Reason::UnknownCategory => "no such category",
        };
        f.write_str(msg)
    }
}

/// Result of a store mutation
///
/// Invalid input is never an error: the store simply leaves state alone and
/// reports `Unchanged` with the reason.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Outcome<T> {
    Applied(T),
    Unchanged(Reason),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// The applied value, if any
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Unchanged(_) => None,
        }
    }

    /// The rejection reason, if any
    pub fn reason(&self) -> Option<Reason> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Unchanged(reason) => Some(*reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Applied(value) => Outcome::Applied(f(value)),
            Outcome::Unchanged(reason) => Outcome::Unchanged(reason),
        }
    }
}
