use crate::contract::model::User;
use async_trait::async_trait;
use uuid::Uuid;

/// A user row as the identity store sees it: the public model plus the
/// password hash, which never crosses the contract boundary.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// Result of an insert attempt. `Duplicate` means a unique constraint on
/// username or email fired; the constraint is the final arbiter for
/// concurrent registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

/// Port for the domain layer: persistence operations the identity gate needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Load a user (with password hash) by username.
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRecord>>;
    /// Check uniqueness by username.
    async fn username_exists(&self, username: &str) -> anyhow::Result<bool>;
    /// Check uniqueness by email.
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    /// Insert a fully-formed user record.
    ///
    /// Service computes id/timestamps/hash; repo persists.
    async fn insert(&self, record: UserRecord) -> anyhow::Result<InsertOutcome>;
}
