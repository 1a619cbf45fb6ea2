use thiserror::Error;
use uuid::Uuid;

/// Stable error contract exposed to other modules
#[derive(Debug, Error)]
pub enum NotesError {
    #[error("Note not found: {id}")]
    NotFound { id: Uuid },

    #[error("Access to note denied: {id}")]
    Forbidden { id: Uuid },

    #[error("Stale revision: current is #{current_revision_number} ({current_revision_id})")]
    Conflict {
        current_revision_id: Uuid,
        current_revision_number: i32,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl NotesError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn forbidden(id: Uuid) -> Self {
        Self::Forbidden { id }
    }

    pub fn conflict(current_revision_id: Uuid, current_revision_number: i32) -> Self {
        Self::Conflict {
            current_revision_id,
            current_revision_number,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}
