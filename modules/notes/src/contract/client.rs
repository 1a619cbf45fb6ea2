use async_trait::async_trait;
use uuid::Uuid;

use super::model::{NewNote, Note, NoteUpdate, Revision, RevisionRef};

/// Public API surface of the notes module.
///
/// Every operation takes the acting user's id explicitly; there is no
/// ambient caller state. Errors are `anyhow::Error` wrapping a
/// [`super::NotesError`] for callers that need to branch on the cause.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Create a note owned by `owner_id` with its first revision
    async fn create_note(&self, owner_id: Uuid, new_note: NewNote) -> anyhow::Result<RevisionRef>;

    /// Append a revision to `note_id`, guarded by the expected revision id
    async fn update_note(
        &self,
        caller_id: Uuid,
        note_id: Uuid,
        update: NoteUpdate,
    ) -> anyhow::Result<RevisionRef>;

    /// Full revision history of `note_id`, oldest first
    async fn history(&self, caller_id: Uuid, note_id: Uuid) -> anyhow::Result<Vec<Revision>>;

    /// All notes owned by `caller_id`, most recently updated first
    async fn list_notes(&self, caller_id: Uuid) -> anyhow::Result<Vec<Note>>;
}
