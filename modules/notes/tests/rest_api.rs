use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension, Router,
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use auth::contract::{client::AuthApi, error::AuthError};
use notes::{
    api::rest::routes,
    domain::service::{Service, ServiceConfig},
    infra::storage::migrations::Migrator,
    infra::storage::sea_orm_repo::SeaOrmNotesRepository,
};

/// Identity gate stub: one fixed token per known user id.
struct StubAuth {
    users: Vec<(String, Uuid)>,
}

#[async_trait]
impl AuthApi for StubAuth {
    async fn resolve_caller(&self, token: &str) -> anyhow::Result<Uuid> {
        self.users
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, id)| *id)
            .ok_or_else(|| anyhow::Error::new(AuthError::unauthenticated()))
    }
}

async fn test_app(users: Vec<(&str, Uuid)>) -> Router {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let repo = SeaOrmNotesRepository::new(db);
    let service = Arc::new(Service::new(Arc::new(repo), ServiceConfig::default()));

    let auth: Arc<dyn AuthApi> = Arc::new(StubAuth {
        users: users
            .into_iter()
            .map(|(t, id)| (t.to_string(), id))
            .collect(),
    });

    routes::router(service).layer(Extension(auth))
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read failed");
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

#[tokio::test]
async fn test_create_note_wire_format() -> Result<()> {
    let alice = Uuid::new_v4();
    let app = test_app(vec![("alice-token", alice)]).await;

    let response = app
        .oneshot(request(
            "POST",
            "/notes",
            Some("alice-token"),
            Some(json!({"title": "Groceries", "content": "milk"})),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert!(body["noteId"].is_string());
    assert!(body["revisionId"].is_string());
    assert_eq!(body["revisionNumber"], 1);

    Ok(())
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() -> Result<()> {
    let app = test_app(vec![]).await;

    let no_header = app
        .clone()
        .oneshot(request("GET", "/notes", None, None))
        .await?;
    assert_eq!(no_header.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        no_header.headers()["content-type"],
        "application/problem+json"
    );

    let bad_token = app
        .oneshot(request("GET", "/notes", Some("bogus"), None))
        .await?;
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_stale_update_returns_conflict_body() -> Result<()> {
    let alice = Uuid::new_v4();
    let app = test_app(vec![("alice-token", alice)]).await;

    let created = json_body(
        app.clone()
            .oneshot(request(
                "POST",
                "/notes",
                Some("alice-token"),
                Some(json!({"title": "Plan", "content": "a"})),
            ))
            .await?,
    )
    .await;
    let note_id = created["noteId"].as_str().expect("noteId").to_string();
    let rev1 = created["revisionId"].as_str().expect("revisionId").to_string();

    let updated = json_body(
        app.clone()
            .oneshot(request(
                "PUT",
                &format!("/notes/{note_id}"),
                Some("alice-token"),
                Some(json!({"expectedRevisionId": rev1, "content": "b"})),
            ))
            .await?,
    )
    .await;
    assert_eq!(updated["revisionNumber"], 2);

    // Writing against revision 1 again: 409 with the current head in the body.
    let conflict = app
        .oneshot(request(
            "PUT",
            &format!("/notes/{note_id}"),
            Some("alice-token"),
            Some(json!({"expectedRevisionId": rev1, "content": "c"})),
        ))
        .await?;
    assert_eq!(conflict.status(), StatusCode::CONFLICT);
    let body = json_body(conflict).await;
    assert_eq!(body["error"], "revision conflict");
    assert_eq!(body["currentRevisionId"], updated["revisionId"]);
    assert_eq!(body["currentRevisionNumber"], 2);

    Ok(())
}

#[tokio::test]
async fn test_history_wire_format() -> Result<()> {
    let alice = Uuid::new_v4();
    let app = test_app(vec![("alice-token", alice)]).await;

    let created = json_body(
        app.clone()
            .oneshot(request(
                "POST",
                "/notes",
                Some("alice-token"),
                Some(json!({"title": "Log", "content": "first"})),
            ))
            .await?,
    )
    .await;
    let note_id = created["noteId"].as_str().expect("noteId").to_string();
    let rev1 = created["revisionId"].as_str().expect("revisionId").to_string();

    app.clone()
        .oneshot(request(
            "PUT",
            &format!("/notes/{note_id}"),
            Some("alice-token"),
            Some(json!({"expectedRevisionId": rev1, "content": "second"})),
        ))
        .await?;

    let response = app
        .oneshot(request(
            "GET",
            &format!("/notes/{note_id}/revisions"),
            Some("alice-token"),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let entries = body.as_array().expect("array body");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["revisionNumber"], 1);
    assert_eq!(entries[0]["content"], "first");
    assert_eq!(entries[1]["revisionNumber"], 2);
    assert_eq!(entries[1]["content"], "second");
    assert!(entries[0]["createdAt"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_foreign_note_is_forbidden_and_unknown_is_not_found() -> Result<()> {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let app = test_app(vec![("alice-token", alice), ("bob-token", bob)]).await;

    let created = json_body(
        app.clone()
            .oneshot(request(
                "POST",
                "/notes",
                Some("alice-token"),
                Some(json!({"title": "Private", "content": "secret"})),
            ))
            .await?,
    )
    .await;
    let note_id = created["noteId"].as_str().expect("noteId").to_string();

    let foreign = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/notes/{note_id}/revisions"),
            Some("bob-token"),
            None,
        ))
        .await?;
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);

    let unknown = app
        .oneshot(request(
            "GET",
            &format!("/notes/{}/revisions", Uuid::new_v4()),
            Some("bob-token"),
            None,
        ))
        .await?;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_list_notes_wire_format() -> Result<()> {
    let alice = Uuid::new_v4();
    let app = test_app(vec![("alice-token", alice)]).await;

    app.clone()
        .oneshot(request(
            "POST",
            "/notes",
            Some("alice-token"),
            Some(json!({"title": "One", "content": "1"})),
        ))
        .await?;

    let response = app
        .oneshot(request("GET", "/notes", Some("alice-token"), None))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let notes = body.as_array().expect("array body");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "One");
    assert!(notes[0]["id"].is_string());
    assert!(notes[0]["createdAt"].is_string());
    assert!(notes[0]["updatedAt"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_empty_title_is_bad_request() -> Result<()> {
    let alice = Uuid::new_v4();
    let app = test_app(vec![("alice-token", alice)]).await;

    let response = app
        .oneshot(request(
            "POST",
            "/notes",
            Some("alice-token"),
            Some(json!({"title": "  ", "content": "x"})),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()["content-type"],
        "application/problem+json"
    );

    Ok(())
}
