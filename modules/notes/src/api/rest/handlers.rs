use axum::extract::Path;
use axum::response::Response;
use axum::{http::StatusCode, response::Json, Extension};
use tracing::{debug, error, info};
use uuid::Uuid;

use auth::Caller;

use crate::api::rest::dto::{CreateNoteReq, NoteDto, RevisionDto, RevisionRefDto, UpdateNoteReq};
use crate::api::rest::error;
use crate::domain::service::Service;

/// Create a note; the body becomes revision 1
pub async fn create_note(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Caller(caller_id): Caller,
    Json(req): Json<CreateNoteReq>,
) -> Result<(StatusCode, Json<RevisionRefDto>), Response> {
    info!("Creating note '{}'", req.title);

    match svc.create_note(caller_id, req.into()).await {
        Ok(r) => Ok((StatusCode::CREATED, Json(r.into()))),
        Err(e) => {
            error!("Failed to create note: {}", e);
            Err(error::map_domain_error(&e, "/notes"))
        }
    }
}

/// List the caller's notes, most recently updated first
pub async fn list_notes(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Caller(caller_id): Caller,
) -> Result<Json<Vec<NoteDto>>, Response> {
    debug!("Listing notes");

    match svc.list_notes(caller_id).await {
        Ok(notes) => Ok(Json(notes.into_iter().map(Into::into).collect())),
        Err(e) => {
            error!("Failed to list notes: {}", e);
            Err(error::map_domain_error(&e, "/notes"))
        }
    }
}

/// Append a revision to a note, guarded by the expected revision id
pub async fn update_note(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Caller(caller_id): Caller,
    Path(note_id): Path<Uuid>,
    Json(req): Json<UpdateNoteReq>,
) -> Result<Json<RevisionRefDto>, Response> {
    debug!("Updating note {}", note_id);

    match svc.update_note(caller_id, note_id, req.into()).await {
        Ok(r) => Ok(Json(r.into())),
        Err(e) => {
            error!("Failed to update note: {}", e);
            Err(error::map_domain_error(&e, &format!("/notes/{}", note_id)))
        }
    }
}

/// Full revision history of a note, oldest first
pub async fn history(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Caller(caller_id): Caller,
    Path(note_id): Path<Uuid>,
) -> Result<Json<Vec<RevisionDto>>, Response> {
    debug!("Reading history of note {}", note_id);

    match svc.history(caller_id, note_id).await {
        Ok(revisions) => Ok(Json(revisions.into_iter().map(Into::into).collect())),
        Err(e) => {
            error!("Failed to read note history: {}", e);
            Err(error::map_domain_error(
                &e,
                &format!("/notes/{}/revisions", note_id),
            ))
        }
    }
}
