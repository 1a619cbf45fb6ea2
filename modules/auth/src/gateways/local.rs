use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{client::AuthApi, error::AuthError};
use crate::domain::service::Service;

/// Local implementation of the AuthApi trait that delegates to the domain service
pub struct AuthLocalClient {
    service: Arc<Service>,
}

impl AuthLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AuthApi for AuthLocalClient {
    async fn resolve_caller(&self, token: &str) -> anyhow::Result<Uuid> {
        self.service
            .resolve(token)
            .ok_or_else(|| anyhow::Error::new(AuthError::unauthenticated()))
    }
}
