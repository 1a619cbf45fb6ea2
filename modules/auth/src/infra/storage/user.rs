use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Find a user by ID
pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(conn).await
}

/// Find a user by username
pub async fn find_by_username<C: ConnectionTrait>(
    conn: &C,
    username: &str,
) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(conn)
        .await
}

/// Check if a username already exists
pub async fn username_exists<C: ConnectionTrait>(conn: &C, username: &str) -> Result<bool, DbErr> {
    let count = Entity::find()
        .filter(Column::Username.eq(username))
        .count(conn)
        .await?;
    Ok(count > 0)
}

/// Check if an email already exists
pub async fn email_exists<C: ConnectionTrait>(conn: &C, email: &str) -> Result<bool, DbErr> {
    let count = Entity::find()
        .filter(Column::Email.eq(email))
        .count(conn)
        .await?;
    Ok(count > 0)
}

/// Insert a new user row
pub async fn insert<C: ConnectionTrait>(conn: &C, row: Model) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(row.id),
        username: Set(row.username),
        email: Set(row.email),
        password_hash: Set(row.password_hash),
        created_at: Set(row.created_at),
    };

    active_model.insert(conn).await
}
