use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{NewNote, Note, NoteUpdate, Revision, RevisionRef};

/// REST DTO for creating a note
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteReq {
    pub title: String,
    pub content: String,
}

/// REST DTO for updating a note; `expected_revision_id` is the revision the
/// caller last observed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteReq {
    pub expected_revision_id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
}

/// REST DTO for the revision produced by a create or update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionRefDto {
    pub note_id: Uuid,
    pub revision_id: Uuid,
    pub revision_number: i32,
}

/// REST DTO for a note in a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDto {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for one entry of a note's history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionDto {
    pub revision_id: Uuid,
    pub revision_number: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body of a 409 response: tells the stale client where the note's head is
/// now, so it can re-fetch and retry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictBody {
    pub error: String,
    pub current_revision_id: Uuid,
    pub current_revision_number: i32,
}

// Conversion implementations between REST DTOs and contract models

impl From<CreateNoteReq> for NewNote {
    fn from(req: CreateNoteReq) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

impl From<UpdateNoteReq> for NoteUpdate {
    fn from(req: UpdateNoteReq) -> Self {
        Self {
            expected_revision_id: req.expected_revision_id,
            title: req.title,
            content: req.content,
        }
    }
}

impl From<RevisionRef> for RevisionRefDto {
    fn from(r: RevisionRef) -> Self {
        Self {
            note_id: r.note_id,
            revision_id: r.revision_id,
            revision_number: r.revision_number,
        }
    }
}

impl From<Note> for NoteDto {
    fn from(n: Note) -> Self {
        Self {
            id: n.id,
            title: n.title,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

impl From<Revision> for RevisionDto {
    fn from(r: Revision) -> Self {
        Self {
            revision_id: r.id,
            revision_number: r.number,
            content: r.content,
            created_at: r.created_at,
        }
    }
}
