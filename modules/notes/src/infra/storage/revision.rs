use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::contract::model::Revision;

/// Revision rows are append-only: no update or delete helpers exist here.
/// Content is nullable in storage; readers map NULL to the empty string.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "note_revisions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub note_id: Uuid,
    pub revision_number: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Revision {
    fn from(row: Model) -> Self {
        Revision {
            id: row.id,
            note_id: row.note_id,
            content: row.content.unwrap_or_default(),
            number: row.revision_number,
            created_at: row.created_at,
        }
    }
}

/// Highest-numbered revision of a note
pub async fn find_latest<C: ConnectionTrait>(
    conn: &C,
    note_id: Uuid,
) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::NoteId.eq(note_id))
        .order_by_desc(Column::RevisionNumber)
        .one(conn)
        .await
}

/// All revisions of a note, oldest first
pub async fn list_for_note<C: ConnectionTrait>(
    conn: &C,
    note_id: Uuid,
) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::NoteId.eq(note_id))
        .order_by_asc(Column::RevisionNumber)
        .all(conn)
        .await
}

/// Insert a new revision row. A unique index on (note_id, revision_number)
/// rejects the insert when another writer claimed the number first.
pub async fn insert<C: ConnectionTrait>(conn: &C, row: Model) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(row.id),
        note_id: Set(row.note_id),
        revision_number: Set(row.revision_number),
        content: Set(row.content),
        created_at: Set(row.created_at),
    };

    active_model.insert(conn).await
}
