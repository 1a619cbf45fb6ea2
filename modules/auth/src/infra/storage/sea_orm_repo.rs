//! SeaORM-backed repository implementation for the identity store port.

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use uuid::Uuid;

use crate::contract::model::User;
use crate::domain::repo::{InsertOutcome, UserRecord, UsersRepository};
use crate::infra::storage::user;

/// SeaORM repository impl. Holds a cheap cloneable connection handle.
pub struct SeaOrmUsersRepository {
    db: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn to_user(row: user::Model) -> User {
    User {
        id: row.id,
        username: row.username,
        email: row.email,
        created_at: row.created_at,
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let found = user::find_by_id(&self.db, id)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(to_user))
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRecord>> {
        let found = user::find_by_username(&self.db, username)
            .await
            .context("find_by_username failed")?;
        Ok(found.map(|row| UserRecord {
            password_hash: row.password_hash.clone(),
            user: to_user(row),
        }))
    }

    async fn username_exists(&self, username: &str) -> anyhow::Result<bool> {
        user::username_exists(&self.db, username)
            .await
            .context("username_exists failed")
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        user::email_exists(&self.db, email)
            .await
            .context("email_exists failed")
    }

    async fn insert(&self, record: UserRecord) -> anyhow::Result<InsertOutcome> {
        let row = user::Model {
            id: record.user.id,
            username: record.user.username,
            email: record.user.email,
            password_hash: record.password_hash,
            created_at: record.user.created_at,
        };

        match user::insert(&self.db, row).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            // Unique constraint on username or email: lost a race against a
            // concurrent registration.
            Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::Duplicate),
            Err(e) => Err(e).context("insert failed"),
        }
    }
}
