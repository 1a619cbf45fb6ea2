use axum::http::StatusCode;
use problem::{Problem, ProblemResponse};

use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    Problem::new(status, title, detail)
        .with_type(format!("https://errors.plume.dev/{}", code))
        .with_code(code)
        .with_instance(instance)
        .into()
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::UsernameTaken { username } => from_parts(
            StatusCode::CONFLICT,
            "AUTH_USERNAME_CONFLICT",
            "Username already taken",
            format!("Username '{}' is already taken", username),
            instance,
        ),
        DomainError::EmailTaken { email } => from_parts(
            StatusCode::CONFLICT,
            "AUTH_EMAIL_CONFLICT",
            "Email already taken",
            format!("Email '{}' is already taken", email),
            instance,
        ),
        DomainError::InvalidCredentials => from_parts(
            StatusCode::UNAUTHORIZED,
            "AUTH_INVALID_CREDENTIALS",
            "Invalid credentials",
            "Unknown username or wrong password",
            instance,
        ),
        DomainError::EmptyUsername
        | DomainError::UsernameTooLong { .. }
        | DomainError::InvalidEmail { .. }
        | DomainError::WeakPassword { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "AUTH_VALIDATION",
            "Validation error",
            format!("{}", e),
            instance,
        ),
        DomainError::PasswordHash { .. } | DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Internal auth error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "Internal error",
                "An internal error occurred",
                instance,
            )
        }
    }
}
