use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Duration;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;

use accounts::{
    api::rest::dto::{AccountDto, SessionUserDto},
    config::AccountsConfig,
    contract::client::AccountsApi,
    domain::error::DomainError,
    domain::model::{Credentials, NewAccount},
    domain::service::{Service, ServiceConfig},
    gateways::local::AccountsLocalClient,
    infra::sessions::MemorySessionStore,
    infra::storage::migrations::Migrator,
    infra::storage::sea_orm_repo::SeaOrmAccountsRepository,
};

/// Create a fresh test database for each test.
/// A single pooled connection keeps the in-memory database alive and shared.
async fn create_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

fn test_config() -> ServiceConfig {
    // Low bcrypt cost keeps the suite fast; production cost comes from config
    let mut config = ServiceConfig::from(&AccountsConfig::default());
    config.bcrypt_cost = 4;
    config
}

async fn create_test_service() -> Arc<Service> {
    let db = create_test_db().await;
    Arc::new(Service::new(
        Arc::new(SeaOrmAccountsRepository::new(db)),
        Arc::new(MemorySessionStore::new()),
        test_config(),
    ))
}

async fn create_test_router() -> Router {
    accounts::api::rest::routes::router(create_test_service().await)
}

fn alice() -> NewAccount {
    NewAccount {
        username: "alice".into(),
        email: "alice@example.com".into(),
        password: "secret12".into(),
    }
}

#[tokio::test]
async fn test_signup_login_session_flow() -> Result<()> {
    let service = create_test_service().await;

    let opened = service.sign_up(alice()).await?;
    assert_eq!(opened.account.username, "alice");

    // Signup opened a usable session
    let ctx = service.authenticate(&opened.token)?;
    assert_eq!(ctx.account_id, opened.account.id);

    // Login opens a fresh session under a different token
    let login = service
        .login(Credentials {
            username: "alice".into(),
            password: "secret12".into(),
        })
        .await?;
    assert_ne!(login.token, opened.token);
    assert_eq!(login.account.id, opened.account.id);

    // Logout destroys only the targeted session
    service.logout(&login.token);
    assert!(service.authenticate(&login.token).is_err());
    assert!(service.authenticate(&opened.token).is_ok());

    Ok(())
}

#[tokio::test]
async fn test_signup_uniqueness() -> Result<()> {
    let service = create_test_service().await;
    service.sign_up(alice()).await?;

    let err = service
        .sign_up(NewAccount {
            email: "other@example.com".into(),
            ..alice()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserAlreadyExists { .. }));

    let err = service
        .sign_up(NewAccount {
            username: "bob".into(),
            ..alice()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmailAlreadyRegistered { .. }));

    Ok(())
}

#[tokio::test]
async fn test_signup_validation() -> Result<()> {
    let service = create_test_service().await;

    let err = service
        .sign_up(NewAccount {
            username: String::new(),
            ..alice()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::RequiredFieldMissing { field: "username" }
    ));

    let err = service
        .sign_up(NewAccount {
            email: "not-an-email".into(),
            ..alice()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidEmail { .. }));

    Ok(())
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() -> Result<()> {
    let service = create_test_service().await;
    service.sign_up(alice()).await?;

    // Wrong password and unknown user yield the same error
    let err = service
        .login(Credentials {
            username: "alice".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));

    let err = service
        .login(Credentials {
            username: "nobody".into(),
            password: "whatever".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));

    Ok(())
}

#[tokio::test]
async fn test_login_throttle_locks_out_after_failures() -> Result<()> {
    let db = create_test_db().await;
    let mut config = test_config();
    config.login_max_attempts = 3;
    let service = Service::new(
        Arc::new(SeaOrmAccountsRepository::new(db)),
        Arc::new(MemorySessionStore::new()),
        config,
    );
    service.sign_up(alice()).await?;

    for _ in 0..3 {
        let err = service
            .login(Credentials {
                username: "alice".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    // Even the correct password is refused while throttled
    let err = service
        .login(Credentials {
            username: "alice".into(),
            password: "secret12".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TooManyAttempts { .. }));

    Ok(())
}

#[tokio::test]
async fn test_session_expiry() -> Result<()> {
    let db = create_test_db().await;
    let mut config = test_config();
    config.session_ttl = Duration::minutes(-1); // sessions are born expired
    let service = Service::new(
        Arc::new(SeaOrmAccountsRepository::new(db)),
        Arc::new(MemorySessionStore::new()),
        config,
    );

    let opened = service.sign_up(alice()).await?;
    let err = service.authenticate(&opened.token).unwrap_err();
    assert!(matches!(err, DomainError::SessionExpired));

    Ok(())
}

#[tokio::test]
async fn test_change_password() -> Result<()> {
    let service = create_test_service().await;
    let opened = service.sign_up(alice()).await?;

    // Wrong current password
    let err = service
        .change_password(opened.account.id, "wrong".into(), "newSecret34".into())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));

    service
        .change_password(opened.account.id, "secret12".into(), "newSecret34".into())
        .await?;

    // Old password no longer works; the new one does
    let err = service
        .login(Credentials {
            username: "alice".into(),
            password: "secret12".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));

    service
        .login(Credentials {
            username: "alice".into(),
            password: "newSecret34".into(),
        })
        .await?;

    // The pre-existing session survived the change
    assert!(service.authenticate(&opened.token).is_ok());

    Ok(())
}

#[tokio::test]
async fn test_local_client_maps_errors() -> Result<()> {
    let service = create_test_service().await;
    let opened = service.sign_up(alice()).await?;

    let client: Arc<dyn AccountsApi> = Arc::new(AccountsLocalClient::new(service));

    let ctx = client.authenticate(&opened.token).await?;
    assert_eq!(ctx.username, "alice");

    assert!(client.authenticate("bogus-token").await.is_err());

    Ok(())
}

// ---- REST flow over the real router ----

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Pull the `sid` value out of a Set-Cookie response header
fn session_cookie_value(response: &axum::response::Response) -> Option<String> {
    let set_cookie = response.headers().get("set-cookie")?.to_str().ok()?;
    let (name_value, _) = set_cookie.split_once(';').unwrap_or((set_cookie, ""));
    let (name, value) = name_value.split_once('=')?;
    (name == "sid").then(|| value.to_string())
}

#[tokio::test]
async fn test_rest_signup_sets_session_cookie() -> Result<()> {
    let router = create_test_router().await;

    let response = router
        .clone()
        .oneshot(json_post(
            "/signup",
            serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "secret12"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let token = session_cookie_value(&response).expect("sid cookie must be set");
    assert!(!token.is_empty());

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let account: AccountDto = serde_json::from_slice(&body)?;
    assert_eq!(account.username, "alice");

    // The cookie drives /session
    let request = Request::builder()
        .method("GET")
        .uri("/session")
        .header("cookie", format!("sid={token}"))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let session: SessionUserDto = serde_json::from_slice(&body)?;
    assert_eq!(session.username, "alice");

    Ok(())
}

#[tokio::test]
async fn test_rest_login_and_logout_round_trip() -> Result<()> {
    let router = create_test_router().await;

    let response = router
        .clone()
        .oneshot(json_post(
            "/signup",
            serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "secret12"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Bad credentials: 401 with the stable code
    let response = router
        .clone()
        .oneshot(json_post(
            "/login",
            serde_json::json!({"username": "alice", "password": "nope"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let problem: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(problem["code"], "INVALID_CREDENTIALS");

    // Good credentials: fresh cookie
    let response = router
        .clone()
        .oneshot(json_post(
            "/login",
            serde_json::json!({"username": "alice", "password": "secret12"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = session_cookie_value(&response).expect("sid cookie must be set");

    // Logout kills the session
    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .header("cookie", format!("sid={token}"))
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = Request::builder()
        .method("GET")
        .uri("/session")
        .header("cookie", format!("sid={token}"))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_rest_signup_conflict_codes() -> Result<()> {
    let router = create_test_router().await;

    let signup = serde_json::json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "secret12"
    });
    let response = router
        .clone()
        .oneshot(json_post("/signup", signup.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router.oneshot(json_post("/signup", signup)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let problem: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(problem["code"], "USER_ALREADY_EXISTS");

    Ok(())
}
