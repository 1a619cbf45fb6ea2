use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use problem::Problem;

use crate::api::rest::dto::ConflictBody;
use crate::domain::error::DomainError;

fn problem_response(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> Response {
    problem::ProblemResponse::from(
        Problem::new(status, title, detail)
            .with_type(format!("https://errors.plume.dev/{}", code))
            .with_code(code)
            .with_instance(instance),
    )
    .into_response()
}

/// Map domain error to an HTTP response.
///
/// Stale-revision conflicts get a plain JSON body carrying the current head,
/// rather than a problem document, so clients can mechanically re-fetch and
/// retry. Everything else is RFC 9457.
pub fn map_domain_error(e: &DomainError, instance: &str) -> Response {
    match e {
        DomainError::StaleRevision {
            current_id,
            current_number,
        } => (
            StatusCode::CONFLICT,
            Json(ConflictBody {
                error: "revision conflict".to_string(),
                current_revision_id: *current_id,
                current_revision_number: *current_number,
            }),
        )
            .into_response(),
        DomainError::NoteNotFound { id } => problem_response(
            StatusCode::NOT_FOUND,
            "NOTES_NOT_FOUND",
            "Note not found",
            format!("Note '{}' does not exist", id),
            instance,
        ),
        DomainError::NotOwner { id } => problem_response(
            StatusCode::FORBIDDEN,
            "NOTES_FORBIDDEN",
            "Access denied",
            format!("Note '{}' belongs to another user", id),
            instance,
        ),
        DomainError::EmptyTitle | DomainError::TitleTooLong { .. } => problem_response(
            StatusCode::BAD_REQUEST,
            "NOTES_VALIDATION",
            "Validation error",
            format!("{}", e),
            instance,
        ),
        DomainError::MissingRevision { .. } | DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Internal notes error occurred");
            problem_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "Internal error",
                "An internal error occurred",
                instance,
            )
        }
    }
}
