use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{Credentials, NewUser, User};
use crate::domain::error::DomainError;
use crate::domain::password;
use crate::domain::repo::{InsertOutcome, UserRecord, UsersRepository};
use crate::domain::token::TokenStore;

/// Domain service for the identity gate: registration, login, and bearer
/// token resolution. Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    tokens: Arc<TokenStore>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub min_password_length: usize,
    pub max_username_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            max_username_length: 64,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self {
            repo,
            tokens: Arc::new(TokenStore::new()),
            config,
        }
    }

    /// Register a new user and issue an access token for them.
    #[instrument(
        name = "auth.service.register",
        skip(self, new_user),
        fields(username = %new_user.username, email = %new_user.email)
    )]
    pub async fn register(&self, new_user: NewUser) -> Result<String, DomainError> {
        info!("Registering new user");

        self.validate_new_user(&new_user)?;

        // Pre-checks give precise errors; the DB unique constraints remain
        // the final arbiter for concurrent registrations.
        if self
            .repo
            .username_exists(&new_user.username)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::username_taken(new_user.username));
        }
        if self
            .repo
            .email_exists(&new_user.email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::email_taken(new_user.email));
        }

        let password_hash = password::hash_password(&new_user.password)?;
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            created_at: Utc::now(),
        };

        let outcome = self
            .repo
            .insert(UserRecord {
                user: user.clone(),
                password_hash,
            })
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if outcome == InsertOutcome::Duplicate {
            // Lost a race against a concurrent registration.
            return Err(DomainError::username_taken(user.username));
        }

        info!("Successfully registered user with id={}", user.id);
        Ok(self.tokens.issue(user.id))
    }

    /// Verify credentials and issue an access token.
    ///
    /// Unknown username and wrong password are indistinguishable to the caller.
    #[instrument(
        name = "auth.service.login",
        skip(self, credentials),
        fields(username = %credentials.username)
    )]
    pub async fn login(&self, credentials: Credentials) -> Result<String, DomainError> {
        debug!("Logging in user");

        let record = self
            .repo
            .find_by_username(&credentials.username)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        let record = match record {
            Some(r) if password::verify_password(&credentials.password, &r.password_hash) => r,
            _ => return Err(DomainError::invalid_credentials()),
        };

        info!("Successfully logged in user with id={}", record.user.id);
        Ok(self.tokens.issue(record.user.id))
    }

    /// Resolve an access token to the user id it was issued for.
    pub fn resolve(&self, token: &str) -> Option<Uuid> {
        self.tokens.resolve(token)
    }

    /// Load the public profile of a user.
    #[instrument(name = "auth.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    // --- validation helpers ---

    fn validate_new_user(&self, new_user: &NewUser) -> Result<(), DomainError> {
        self.validate_username(&new_user.username)?;
        self.validate_email(&new_user.email)?;
        self.validate_password(&new_user.password)?;
        Ok(())
    }

    fn validate_username(&self, username: &str) -> Result<(), DomainError> {
        if username.trim().is_empty() {
            return Err(DomainError::empty_username());
        }
        if username.len() > self.config.max_username_length {
            return Err(DomainError::username_too_long(
                username.len(),
                self.config.max_username_length,
            ));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if email.is_empty() || !email.contains('@') || !email.contains('.') {
            return Err(DomainError::invalid_email(email.to_string()));
        }
        Ok(())
    }

    fn validate_password(&self, pw: &str) -> Result<(), DomainError> {
        if pw.len() < self.config.min_password_length {
            return Err(DomainError::weak_password(self.config.min_password_length));
        }
        Ok(())
    }
}
