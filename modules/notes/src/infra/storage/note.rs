use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::contract::model::Note;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Note {
    fn from(row: Model) -> Self {
        Note {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Find a note by ID
pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(conn).await
}

/// Notes owned by a user, most recently updated first
pub async fn list_by_owner<C: ConnectionTrait>(
    conn: &C,
    owner_id: Uuid,
) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .order_by_desc(Column::UpdatedAt)
        .all(conn)
        .await
}

/// Insert a new note row
pub async fn insert<C: ConnectionTrait>(conn: &C, row: Model) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(row.id),
        owner_id: Set(row.owner_id),
        title: Set(row.title),
        created_at: Set(row.created_at),
        updated_at: Set(row.updated_at),
    };

    active_model.insert(conn).await
}

/// Update a note's title (when given) and touch its `updated_at`
pub async fn rename_and_touch<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    title: Option<&str>,
    at: DateTime<Utc>,
) -> Result<(), DbErr> {
    let mut update = Entity::update_many()
        .col_expr(Column::UpdatedAt, Expr::value(at))
        .filter(Column::Id.eq(id));
    if let Some(title) = title {
        update = update.col_expr(Column::Title, Expr::value(title));
    }
    update.exec(conn).await?;
    Ok(())
}
