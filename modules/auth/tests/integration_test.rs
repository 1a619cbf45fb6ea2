use std::sync::Arc;

use anyhow::Result;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use auth::{
    contract::{client::AuthApi, error::AuthError, model::Credentials, model::NewUser},
    domain::error::DomainError,
    domain::service::{Service, ServiceConfig},
    gateways::local::AuthLocalClient,
    infra::storage::migrations::Migrator,
    infra::storage::sea_orm_repo::SeaOrmUsersRepository,
};

/// Create a fresh test database for each test
async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test domain service
async fn create_test_service() -> Arc<Service> {
    let db = create_test_db().await;
    let repo = SeaOrmUsersRepository::new(db);
    Arc::new(Service::new(Arc::new(repo), ServiceConfig::default()))
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
    }
}

#[tokio::test]
async fn test_register_then_login_and_resolve() -> Result<()> {
    let service = create_test_service().await;

    let register_token = service.register(new_user("alice", "alice@example.com")).await?;
    let registered_id = service.resolve(&register_token).expect("token should resolve");

    let login_token = service
        .login(Credentials {
            username: "alice".to_string(),
            password: "password123".to_string(),
        })
        .await?;

    // Each issue is a fresh token, but both belong to the same user.
    assert_ne!(register_token, login_token);
    assert_eq!(service.resolve(&login_token), Some(registered_id));

    let profile = service.get_user(registered_id).await?.expect("user exists");
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.email, "alice@example.com");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() -> Result<()> {
    let service = create_test_service().await;

    service.register(new_user("bob", "bob@example.com")).await?;

    let result = service.register(new_user("bob", "other@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::UsernameTaken { username }) if username == "bob"
    ));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() -> Result<()> {
    let service = create_test_service().await;

    service.register(new_user("carol", "carol@example.com")).await?;

    let result = service.register(new_user("carla", "carol@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::EmailTaken { email }) if email == "carol@example.com"
    ));

    Ok(())
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() -> Result<()> {
    let service = create_test_service().await;

    service.register(new_user("dave", "dave@example.com")).await?;

    let wrong_password = service
        .login(Credentials {
            username: "dave".to_string(),
            password: "not-the-password".to_string(),
        })
        .await;
    let unknown_user = service
        .login(Credentials {
            username: "nobody".to_string(),
            password: "password123".to_string(),
        })
        .await;

    assert!(matches!(wrong_password, Err(DomainError::InvalidCredentials)));
    assert!(matches!(unknown_user, Err(DomainError::InvalidCredentials)));

    Ok(())
}

#[tokio::test]
async fn test_registration_validation() -> Result<()> {
    let service = create_test_service().await;

    let empty_username = service.register(new_user("   ", "x@example.com")).await;
    assert!(matches!(empty_username, Err(DomainError::EmptyUsername)));

    let bad_email = service.register(new_user("eve", "not-an-email")).await;
    assert!(matches!(bad_email, Err(DomainError::InvalidEmail { .. })));

    let weak = service
        .register(NewUser {
            username: "eve".to_string(),
            email: "eve@example.com".to_string(),
            password: "short".to_string(),
        })
        .await;
    assert!(matches!(weak, Err(DomainError::WeakPassword { min: 8 })));

    Ok(())
}

#[tokio::test]
async fn test_local_client_resolve_caller() -> Result<()> {
    let service = create_test_service().await;
    let client: Arc<dyn AuthApi> = Arc::new(AuthLocalClient::new(service.clone()));

    let token = service.register(new_user("frank", "frank@example.com")).await?;
    let resolved = client.resolve_caller(&token).await?;
    assert_eq!(service.resolve(&token), Some(resolved));

    let err = client
        .resolve_caller("bogus-token")
        .await
        .expect_err("bogus token must not resolve");
    assert!(matches!(
        err.downcast_ref::<AuthError>(),
        Some(AuthError::Unauthenticated)
    ));

    Ok(())
}
