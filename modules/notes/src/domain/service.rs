use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{NewNote, Note, NoteUpdate, Revision, RevisionRef};
use crate::domain::error::DomainError;
use crate::domain::repo::{AppendOutcome, NotesRepository};

/// Domain service for revisioned notes: creation, guarded updates, and
/// history reads. Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn NotesRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_title_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_title_length: 255,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn NotesRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// Create a note owned by `owner_id`; its content becomes revision 1.
    #[instrument(
        name = "notes.service.create_note",
        skip(self, new_note),
        fields(owner_id = %owner_id)
    )]
    pub async fn create_note(
        &self,
        owner_id: Uuid,
        new_note: NewNote,
    ) -> Result<RevisionRef, DomainError> {
        info!("Creating note");

        self.validate_title(&new_note.title)?;

        let (note, revision) = self
            .repo
            .create(owner_id, new_note.title.trim(), &new_note.content)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Created note id={} at revision 1", note.id);
        Ok(RevisionRef {
            note_id: note.id,
            revision_id: revision.id,
            revision_number: revision.number,
        })
    }

    /// Append a revision to `note_id` on behalf of `caller_id`.
    ///
    /// The update carries the revision id the caller last observed; if it is
    /// no longer the latest, the append is refused and the caller learns the
    /// current head so it can re-read and retry.
    #[instrument(
        name = "notes.service.update_note",
        skip(self, update),
        fields(caller_id = %caller_id, note_id = %note_id)
    )]
    pub async fn update_note(
        &self,
        caller_id: Uuid,
        note_id: Uuid,
        update: NoteUpdate,
    ) -> Result<RevisionRef, DomainError> {
        debug!("Updating note");

        if let Some(title) = &update.title {
            self.validate_title(title)?;
        }
        self.load_owned(caller_id, note_id).await?;

        let outcome = self
            .repo
            .append_next(
                note_id,
                update.expected_revision_id,
                update.title.as_deref().map(str::trim),
                &update.content,
            )
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        match outcome {
            AppendOutcome::Appended(revision) => {
                info!("Appended revision #{} to note", revision.number);
                Ok(RevisionRef {
                    note_id,
                    revision_id: revision.id,
                    revision_number: revision.number,
                })
            }
            AppendOutcome::Conflict { current } => {
                debug!("Update refused; current revision is #{}", current.number);
                Err(DomainError::stale_revision(current.id, current.number))
            }
            AppendOutcome::MissingHistory => {
                warn!("Note exists but has no revisions");
                Err(DomainError::missing_revision(note_id))
            }
        }
    }

    /// Full revision history of `note_id`, oldest first.
    #[instrument(
        name = "notes.service.history",
        skip(self),
        fields(caller_id = %caller_id, note_id = %note_id)
    )]
    pub async fn history(
        &self,
        caller_id: Uuid,
        note_id: Uuid,
    ) -> Result<Vec<Revision>, DomainError> {
        self.load_owned(caller_id, note_id).await?;

        let revisions = self
            .repo
            .list_revisions(note_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if revisions.is_empty() {
            warn!("Note exists but has no revisions");
            return Err(DomainError::missing_revision(note_id));
        }
        Ok(revisions)
    }

    /// Notes owned by `caller_id`, most recently updated first.
    #[instrument(name = "notes.service.list_notes", skip(self), fields(caller_id = %caller_id))]
    pub async fn list_notes(&self, caller_id: Uuid) -> Result<Vec<Note>, DomainError> {
        self.repo
            .list_by_owner(caller_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    // --- helpers ---

    /// Load a note and check the caller owns it. Ownership failures and
    /// missing notes are distinct errors; the API layer may choose to
    /// collapse them.
    async fn load_owned(&self, caller_id: Uuid, note_id: Uuid) -> Result<Note, DomainError> {
        let note = self
            .repo
            .find_note(note_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::note_not_found(note_id))?;
        if note.owner_id != caller_id {
            return Err(DomainError::not_owner(note_id));
        }
        Ok(note)
    }

    fn validate_title(&self, title: &str) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::empty_title());
        }
        if title.len() > self.config.max_title_length {
            return Err(DomainError::title_too_long(
                title.len(),
                self.config.max_title_length,
            ));
        }
        Ok(())
    }
}
