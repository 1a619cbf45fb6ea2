use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    #[error("Email '{email}' is already taken")]
    EmailTaken { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username too long: {len} characters (max: {max})")]
    UsernameTooLong { len: usize, max: usize },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Password too short (min: {min} characters)")]
    WeakPassword { min: usize },

    #[error("Password hashing failed: {message}")]
    PasswordHash { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn username_taken(username: String) -> Self {
        Self::UsernameTaken { username }
    }

    pub fn email_taken(email: String) -> Self {
        Self::EmailTaken { email }
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn empty_username() -> Self {
        Self::EmptyUsername
    }

    pub fn username_too_long(len: usize, max: usize) -> Self {
        Self::UsernameTooLong { len, max }
    }

    pub fn invalid_email(email: String) -> Self {
        Self::InvalidEmail { email }
    }

    pub fn weak_password(min: usize) -> Self {
        Self::WeakPassword { min }
    }

    pub fn password_hash(message: impl Into<String>) -> Self {
        Self::PasswordHash {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
