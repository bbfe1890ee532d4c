use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension, Router,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;
use uuid::Uuid;

use accounts::contract::model::AuthContext;
use schedule::{
    api::rest::dto::{CreateEntryReq, EntryListDto, ScheduleEntryDto, UpdateEntryReq},
    contract::model::{EntryPatch, NewEntry},
    domain::error::DomainError,
    domain::service::Service,
    infra::storage::migrations::Migrator,
    infra::storage::sea_orm_repo::SeaOrmScheduleRepository,
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

/// Create a test domain service backed by the SeaORM repository
async fn create_test_service() -> Arc<Service> {
    let db = create_test_db().await;
    Arc::new(Service::new(Arc::new(SeaOrmScheduleRepository::new(db))))
}

/// Create a test HTTP router with a fixed authenticated identity
async fn create_test_router(auth: AuthContext) -> Router {
    let service = create_test_service().await;
    schedule::api::rest::routes::router(service).layer(Extension(auth))
}

fn auth_ctx() -> AuthContext {
    AuthContext {
        account_id: Uuid::new_v4(),
        username: "u1".into(),
    }
}

fn new_entry(title: &str, start: &str, end: &str) -> NewEntry {
    NewEntry {
        title: title.into(),
        start: start.into(),
        end: end.into(),
        color: "#0af".into(),
    }
}

#[tokio::test]
async fn test_service_crud_against_sqlite() -> Result<()> {
    let service = create_test_service().await;
    let owner = Uuid::new_v4();

    // Create
    let created = service
        .create_entry(owner, new_entry("standup", "09:00", "09:30"))
        .await?;
    assert_eq!(created.start_min, 540);
    assert_eq!(created.end_min, 570);

    // List
    let entries = service.list_entries(owner).await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, created.id);

    // Update (patch only the title)
    let updated = service
        .update_entry(
            owner,
            created.id,
            EntryPatch {
                title: Some("daily standup".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.title, "daily standup");
    assert_eq!(updated.start_min, 540); // unchanged

    // Delete
    service.delete_entry(owner, created.id).await?;
    assert!(service.list_entries(owner).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_overlap_is_enforced_per_owner_in_sqlite() -> Result<()> {
    let service = create_test_service().await;
    let u1 = Uuid::new_v4();
    let u2 = Uuid::new_v4();

    service
        .create_entry(u1, new_entry("standup", "09:00", "09:30"))
        .await?;

    // Overlapping for the same owner: rejected
    let err = service
        .create_entry(u1, new_entry("clash", "09:15", "09:45"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Overlap));

    // Same interval for another owner: accepted
    service
        .create_entry(u2, new_entry("standup", "09:15", "09:45"))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_update_escapes_its_own_interval() -> Result<()> {
    let service = create_test_service().await;
    let owner = Uuid::new_v4();

    let entry = service
        .create_entry(owner, new_entry("standup", "09:00", "09:30"))
        .await?;

    let updated = service
        .update_entry(
            owner,
            entry.id,
            EntryPatch {
                start: Some("09:30".into()),
                end: Some("10:00".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!((updated.start_min, updated.end_min), (570, 600));

    Ok(())
}

#[tokio::test]
async fn test_concurrent_overlapping_creates_admit_exactly_one() -> Result<()> {
    let service = create_test_service().await;
    let owner = Uuid::new_v4();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .create_entry(owner, new_entry("race", "09:00", "10:00"))
                .await
        }));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => ok += 1,
            Err(DomainError::Overlap) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(conflicts, 3);
    assert_eq!(service.list_entries(owner).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_rest_api_create_and_list() -> Result<()> {
    let router = create_test_router(auth_ctx()).await;

    let create_request = CreateEntryReq {
        title: "standup".into(),
        start: "09:00".into(),
        end: "09:30".into(),
        color: "#0af".into(),
    };

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&create_request)?))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let entry: ScheduleEntryDto = serde_json::from_slice(&body)?;
    assert_eq!(entry.start, "09:00");
    assert_eq!(entry.end, "09:30");

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let list: EntryListDto = serde_json::from_slice(&body)?;
    assert_eq!(list.total, 1);
    assert_eq!(list.entries[0].title, "standup");

    Ok(())
}

#[tokio::test]
async fn test_rest_api_overlap_conflict() -> Result<()> {
    let router = create_test_router(auth_ctx()).await;

    let post = |req: CreateEntryReq| {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&req).unwrap()))
            .unwrap()
    };

    let first = CreateEntryReq {
        title: "standup".into(),
        start: "09:00".into(),
        end: "09:30".into(),
        color: "#0af".into(),
    };
    let response = router.clone().oneshot(post(first)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let clash = CreateEntryReq {
        title: "clash".into(),
        start: "09:15".into(),
        end: "09:45".into(),
        color: "#f50".into(),
    };
    let response = router.clone().oneshot(post(clash)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let problem: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(problem["code"], "SCHEDULE_OVERLAP");

    Ok(())
}

#[tokio::test]
async fn test_rest_api_validation_errors() -> Result<()> {
    let router = create_test_router(auth_ctx()).await;

    let cases = [
        ("", "09:00", "09:30", "REQUIRED_FIELD_MISSING"),
        ("x", "25:00", "26:00", "INVALID_TIME_FORMAT"),
        ("x", "10:00", "09:00", "INVALID_TIME_ORDER"),
    ];

    for (title, start, end, expected_code) in cases {
        let req = CreateEntryReq {
            title: title.into(),
            start: start.into(),
            end: end.into(),
            color: "#0af".into(),
        };
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&req)?))
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let problem: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(problem["code"], expected_code, "case {start}-{end}");
    }

    Ok(())
}

#[tokio::test]
async fn test_rest_api_update_and_not_found() -> Result<()> {
    let router = create_test_router(auth_ctx()).await;

    let unknown = Uuid::new_v4();
    let patch = UpdateEntryReq {
        end: Some("10:00".into()),
        ..Default::default()
    };
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{unknown}"))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&patch)?))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{unknown}"))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_rest_api_behind_real_session_middleware() -> Result<()> {
    use accounts::infra::sessions::MemorySessionStore;
    use axum::middleware;

    // Real accounts service with an in-memory session; no cookie → 401,
    // valid cookie → entries flow through with the session's identity.
    let accounts_service = Arc::new(accounts::domain::service::Service::new(
        Arc::new(accounts_test_repo().await),
        Arc::new(MemorySessionStore::new()),
        accounts::domain::service::ServiceConfig::default(),
    ));
    let opened = accounts_service
        .sign_up(accounts::domain::model::NewAccount {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "secret12".into(),
        })
        .await?;

    let accounts_api: Arc<dyn accounts::contract::client::AccountsApi> = Arc::new(
        accounts::gateways::local::AccountsLocalClient::new(accounts_service),
    );

    let schedule_service = create_test_service().await;
    let router = schedule::api::rest::routes::router(schedule_service).layer(
        middleware::from_fn_with_state(
            accounts_api,
            accounts::api::rest::auth::require_auth,
        ),
    );

    // Without a cookie: unauthorized
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // With the session cookie: authorized
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header("cookie", format!("sid={}", opened.token))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

async fn accounts_test_repo() -> accounts::infra::storage::sea_orm_repo::SeaOrmAccountsRepository {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("accounts test db");
    accounts::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .expect("accounts migrations");
    accounts::infra::storage::sea_orm_repo::SeaOrmAccountsRepository::new(db)
}
