use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{Note, Revision};

/// Result of a guarded revision append
#[derive(Debug)]
pub enum AppendOutcome {
    /// The expected revision was still the latest; the new revision was written
    Appended(Revision),
    /// Someone else's revision is now the latest; nothing was written
    Conflict { current: Revision },
    /// The note exists but has no revisions (storage integrity violation)
    MissingHistory,
}

/// Persistence port for notes and their revision ledgers.
///
/// `append_next` is the compare-and-append primitive: implementations must
/// perform the latest-revision check and the insert atomically, so that of
/// any set of concurrent appends against the same expected revision exactly
/// one succeeds.
#[async_trait]
pub trait NotesRepository: Send + Sync {
    /// Insert a note together with its revision number 1, atomically.
    async fn create(
        &self,
        owner_id: Uuid,
        title: &str,
        content: &str,
    ) -> anyhow::Result<(Note, Revision)>;

    /// Load a note by id.
    async fn find_note(&self, note_id: Uuid) -> anyhow::Result<Option<Note>>;

    /// Highest-numbered revision of a note, if any.
    async fn latest_revision(&self, note_id: Uuid) -> anyhow::Result<Option<Revision>>;

    /// All revisions of a note ordered by ascending revision number.
    async fn list_revisions(&self, note_id: Uuid) -> anyhow::Result<Vec<Revision>>;

    /// Notes owned by `owner_id`, most recently updated first.
    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Note>>;

    /// Append the next revision if `expected_revision_id` is still the latest.
    /// On success the note's title is updated (when `title` is `Some`) and its
    /// `updated_at` is touched, in the same transaction as the insert.
    async fn append_next(
        &self,
        note_id: Uuid,
        expected_revision_id: Uuid,
        title: Option<&str>,
        content: &str,
    ) -> anyhow::Result<AppendOutcome>;
}
