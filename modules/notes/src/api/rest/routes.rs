use axum::{
    routing::{get, put},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Build the notes router. The caller extractor expects an
/// `Arc<dyn AuthApi>` extension; the binary layers it over the merged app.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route("/notes/{id}", put(handlers::update_note))
        .route("/notes/{id}/revisions", get(handlers::history))
        .layer(Extension(service))
}
