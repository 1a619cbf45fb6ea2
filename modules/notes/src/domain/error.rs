use thiserror::Error;
use uuid::Uuid;

/// Internal domain errors for the notes service
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Note not found: {id}")]
    NoteNotFound { id: Uuid },

    #[error("Note {id} is not owned by the caller")]
    NotOwner { id: Uuid },

    #[error("Expected revision is stale; current is #{current_number} ({current_id})")]
    StaleRevision { current_id: Uuid, current_number: i32 },

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Title too long: {len} characters (max {max})")]
    TitleTooLong { len: usize, max: usize },

    #[error("Note {note_id} has no revisions")]
    MissingRevision { note_id: Uuid },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn note_not_found(id: Uuid) -> Self {
        Self::NoteNotFound { id }
    }

    pub fn not_owner(id: Uuid) -> Self {
        Self::NotOwner { id }
    }

    pub fn stale_revision(current_id: Uuid, current_number: i32) -> Self {
        Self::StaleRevision {
            current_id,
            current_number,
        }
    }

    pub fn empty_title() -> Self {
        Self::EmptyTitle
    }

    pub fn title_too_long(len: usize, max: usize) -> Self {
        Self::TitleTooLong { len, max }
    }

    pub fn missing_revision(note_id: Uuid) -> Self {
        Self::MissingRevision { note_id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
