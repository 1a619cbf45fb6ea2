use axum::{http::StatusCode, response::Json, Extension};
use problem::ProblemResponse;
use tracing::{error, info};

use crate::api::rest::dto::{LoginReq, RegisterReq, TokenDto};
use crate::api::rest::error;
use crate::domain::service::Service;

/// Register a new user and return an access token
pub async fn register(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<TokenDto>), ProblemResponse> {
    info!("Registering user '{}'", req.username);

    match svc.register(req.into()).await {
        Ok(token) => Ok((
            StatusCode::CREATED,
            Json(TokenDto {
                access_token: token,
            }),
        )),
        Err(e) => {
            error!("Failed to register user: {}", e);
            Err(error::map_domain_error(&e, "/auth/register"))
        }
    }
}

/// Log in with username/password and return an access token
pub async fn login(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Json(req): Json<LoginReq>,
) -> Result<Json<TokenDto>, ProblemResponse> {
    info!("Logging in user '{}'", req.username);

    match svc.login(req.into()).await {
        Ok(token) => Ok(Json(TokenDto {
            access_token: token,
        })),
        Err(e) => {
            error!("Failed to log in user: {}", e);
            Err(error::map_domain_error(&e, "/auth/login"))
        }
    }
}
