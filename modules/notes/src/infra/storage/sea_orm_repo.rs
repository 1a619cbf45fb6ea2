//! SeaORM-backed repository implementation for the notes store port.

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};
use uuid::Uuid;

use crate::contract::model::{Note, Revision};
use crate::domain::repo::{AppendOutcome, NotesRepository};
use crate::infra::storage::{note, revision};

/// SeaORM repository impl. Holds a cheap cloneable connection handle.
pub struct SeaOrmNotesRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl NotesRepository for SeaOrmNotesRepository {
    async fn create(
        &self,
        owner_id: Uuid,
        title: &str,
        content: &str,
    ) -> anyhow::Result<(Note, Revision)> {
        let now = Utc::now();
        let note_row = note::Model {
            id: Uuid::new_v4(),
            owner_id,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };
        let revision_row = revision::Model {
            id: Uuid::new_v4(),
            note_id: note_row.id,
            revision_number: 1,
            content: Some(content.to_string()),
            created_at: now,
        };

        // The note and its first revision land together or not at all.
        let txn = self.db.begin().await.context("begin failed")?;
        note::insert(&txn, note_row.clone())
            .await
            .context("note insert failed")?;
        revision::insert(&txn, revision_row.clone())
            .await
            .context("revision insert failed")?;
        txn.commit().await.context("commit failed")?;

        Ok((note_row.into(), revision_row.into()))
    }

    async fn find_note(&self, note_id: Uuid) -> anyhow::Result<Option<Note>> {
        let found = note::find_by_id(&self.db, note_id)
            .await
            .context("find_note failed")?;
        Ok(found.map(Into::into))
    }

    async fn latest_revision(&self, note_id: Uuid) -> anyhow::Result<Option<Revision>> {
        let found = revision::find_latest(&self.db, note_id)
            .await
            .context("latest_revision failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_revisions(&self, note_id: Uuid) -> anyhow::Result<Vec<Revision>> {
        let rows = revision::list_for_note(&self.db, note_id)
            .await
            .context("list_revisions failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Note>> {
        let rows = note::list_by_owner(&self.db, owner_id)
            .await
            .context("list_by_owner failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn append_next(
        &self,
        note_id: Uuid,
        expected_revision_id: Uuid,
        title: Option<&str>,
        content: &str,
    ) -> anyhow::Result<AppendOutcome> {
        // Read-check-insert inside one transaction. If a concurrent writer
        // claims the next revision number between our read and our insert,
        // the unique index fires; one retry re-reads the head, which then
        // surfaces as a plain conflict.
        for _attempt in 0..2 {
            let txn = self.db.begin().await.context("begin failed")?;

            let latest = revision::find_latest(&txn, note_id)
                .await
                .context("head read failed")?;
            let latest = match latest {
                Some(r) => r,
                None => return Ok(AppendOutcome::MissingHistory),
            };
            if latest.id != expected_revision_id {
                return Ok(AppendOutcome::Conflict {
                    current: latest.into(),
                });
            }

            let now = Utc::now();
            let row = revision::Model {
                id: Uuid::new_v4(),
                note_id,
                revision_number: latest.revision_number + 1,
                content: Some(content.to_string()),
                created_at: now,
            };
            match revision::insert(&txn, row.clone()).await {
                Ok(_) => {
                    note::rename_and_touch(&txn, note_id, title, now)
                        .await
                        .context("note touch failed")?;
                    txn.commit().await.context("commit failed")?;
                    return Ok(AppendOutcome::Appended(row.into()));
                }
                Err(e) if is_unique_violation(&e) => {
                    txn.rollback().await.context("rollback failed")?;
                    continue;
                }
                Err(e) => return Err(e).context("revision insert failed"),
            }
        }

        // Both attempts lost the race; report whoever won as the current head.
        let current = revision::find_latest(&self.db, note_id)
            .await
            .context("head read failed")?;
        match current {
            Some(r) => Ok(AppendOutcome::Conflict { current: r.into() }),
            None => Ok(AppendOutcome::MissingHistory),
        }
    }
}
