use async_trait::async_trait;
use uuid::Uuid;

/// Public API trait for the auth module that other modules can use.
///
/// This is the identity gate: consumers hand over a bearer token and get
/// back the stable user id it was issued to. Consumers never see raw
/// credentials; failures carry [`crate::contract::error::AuthError`]
/// (retrievable via `anyhow::Error::downcast_ref`).
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Resolve a bearer token to the user id it belongs to
    async fn resolve_caller(&self, token: &str) -> anyhow::Result<Uuid>;
}
