//! Authenticated-caller extractor.
//!
//! Reads the `Authorization: Bearer` header and resolves it through the
//! identity gate before the handler body runs, so every handler receives
//! the caller's user id as an explicit argument instead of reading it from
//! ambient request state.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use problem::ProblemResponse;
use uuid::Uuid;

use crate::contract::{client::AuthApi, error::AuthError};

/// The resolved identity of the calling user.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Uuid);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .extensions
            .get::<Arc<dyn AuthApi>>()
            .cloned()
            .ok_or_else(|| problem::internal_error("Identity gate is not wired"))?;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| problem::unauthorized("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| problem::unauthorized("Expected a Bearer token"))?;

        match auth.resolve_caller(token).await {
            Ok(user_id) => Ok(Caller(user_id)),
            Err(e)
                if matches!(
                    e.downcast_ref::<AuthError>(),
                    Some(AuthError::Unauthenticated)
                ) =>
            {
                Err(problem::unauthorized("Invalid access token"))
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to resolve caller");
                Err(problem::internal_error("An internal error occurred"))
            }
        }
    }
}
