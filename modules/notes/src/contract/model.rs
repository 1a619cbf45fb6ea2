use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure note model for inter-module communication (no serde).
///
/// A note carries no content of its own: its current content is the content
/// of its highest-numbered revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One immutable snapshot of a note's content.
///
/// Per note, revision numbers are a gap-free sequence 1, 2, 3, …; the
/// revision id is the version token a caller must present to authorize
/// the next write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub id: Uuid,
    pub note_id: Uuid,
    pub content: String,
    pub number: i32,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new note (title plus the content of revision 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

/// Data for updating a note: the caller's proof of the last revision it
/// observed, an optional new title, and the new content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteUpdate {
    pub expected_revision_id: Uuid,
    pub title: Option<String>,
    pub content: String,
}

/// Reference to the revision produced by a successful create or update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionRef {
    pub note_id: Uuid,
    pub revision_id: Uuid,
    pub revision_number: i32,
}
