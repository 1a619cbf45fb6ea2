use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::client::NotesApi;
use crate::contract::model::{NewNote, Note, NoteUpdate, Revision, RevisionRef};
use crate::domain::service::Service;
use crate::gateways::error_map::to_contract_error;

/// Local implementation of the NotesApi trait that delegates to the domain service
pub struct NotesLocalClient {
    service: Arc<Service>,
}

impl NotesLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl NotesApi for NotesLocalClient {
    async fn create_note(&self, owner_id: Uuid, new_note: NewNote) -> anyhow::Result<RevisionRef> {
        self.service
            .create_note(owner_id, new_note)
            .await
            .map_err(|e| anyhow::Error::new(to_contract_error(e)))
    }

    async fn update_note(
        &self,
        caller_id: Uuid,
        note_id: Uuid,
        update: NoteUpdate,
    ) -> anyhow::Result<RevisionRef> {
        self.service
            .update_note(caller_id, note_id, update)
            .await
            .map_err(|e| anyhow::Error::new(to_contract_error(e)))
    }

    async fn history(&self, caller_id: Uuid, note_id: Uuid) -> anyhow::Result<Vec<Revision>> {
        self.service
            .history(caller_id, note_id)
            .await
            .map_err(|e| anyhow::Error::new(to_contract_error(e)))
    }

    async fn list_notes(&self, caller_id: Uuid) -> anyhow::Result<Vec<Note>> {
        self.service
            .list_notes(caller_id)
            .await
            .map_err(|e| anyhow::Error::new(to_contract_error(e)))
    }
}
