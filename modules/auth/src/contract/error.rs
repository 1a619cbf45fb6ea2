use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone)]
pub enum AuthError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    #[error("Email '{email}' is already taken")]
    EmailTaken { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl AuthError {
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated
    }

    pub fn username_taken(username: String) -> Self {
        Self::UsernameTaken { username }
    }

    pub fn email_taken(email: String) -> Self {
        Self::EmailTaken { email }
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}
