use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::{middleware, routing::get, Router};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;

use accounts::contract::client::AccountsApi;
use accounts::gateways::local::AccountsLocalClient;
use accounts::infra::sessions::MemorySessionStore;
use accounts::infra::storage::sea_orm_repo::SeaOrmAccountsRepository;
use api_core::request_id::{self, MakeReqId};
use runtime::{AppConfig, CliArgs};
use schedule::infra::storage::sea_orm_repo::SeaOrmScheduleRepository;

use crate::config::ApiConfig;
use crate::{absolutize_sqlite_dsn, detect_from_dsn, openapi, web};

/// Module services the router is wired with.
pub struct Services {
    pub accounts: Arc<accounts::domain::service::Service>,
    pub schedule: Arc<schedule::domain::service::Service>,
}

pub async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");

    let db = connect_database(&config, &args).await?;
    run_migrations(&db).await?;

    let accounts_cfg: accounts::config::AccountsConfig = config.module_config("accounts")?;
    let api_cfg: ApiConfig = config.module_config("api")?;

    let services = build_services(db, &accounts_cfg);
    let router = build_router(&services, &api_cfg, config.server.timeout_sec);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_database(config: &AppConfig, args: &CliArgs) -> Result<DatabaseConnection> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("Database configuration is required"))?;
    let _backend = detect_from_dsn(&db_config)?;

    let config_dsn = db_config.url.trim().to_owned();
    if config_dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    // Override with in-memory SQLite when --mock is set
    let mut final_dsn = if args.mock {
        "sqlite::memory:".to_string()
    } else {
        config_dsn
    };

    // Absolutize sqlite DSNs to avoid cwd issues
    if final_dsn.starts_with("sqlite://") {
        let base_dir = PathBuf::from(&config.server.home_dir);
        final_dsn = absolutize_sqlite_dsn(&final_dsn, &base_dir, true)?;
    }

    // An in-memory SQLite database exists per connection; the pool must
    // not fan out or each connection would see its own empty database.
    let max_conns = if final_dsn == "sqlite::memory:" {
        1
    } else {
        db_config.max_conns.unwrap_or(10)
    };

    let mut opts = ConnectOptions::new(final_dsn.clone());
    opts.max_connections(max_conns)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    tracing::info!("Connecting to database: {}", final_dsn);
    let db = Database::connect(opts)
        .await
        .context("database connection failed")?;
    tracing::info!("Connected DB backend: {:?}", db.get_database_backend());
    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    accounts::infra::storage::migrations::Migrator::up(db, None)
        .await
        .context("accounts migrations failed")?;
    schedule::infra::storage::migrations::Migrator::up(db, None)
        .await
        .context("schedule migrations failed")?;
    Ok(())
}

pub fn build_services(
    db: DatabaseConnection,
    accounts_cfg: &accounts::config::AccountsConfig,
) -> Services {
    let accounts_service = Arc::new(accounts::domain::service::Service::new(
        Arc::new(SeaOrmAccountsRepository::new(db.clone())),
        Arc::new(MemorySessionStore::new()),
        accounts::domain::service::ServiceConfig::from(accounts_cfg),
    ));
    let schedule_service = Arc::new(schedule::domain::service::Service::new(Arc::new(
        SeaOrmScheduleRepository::new(db),
    )));
    Services {
        accounts: accounts_service,
        schedule: schedule_service,
    }
}

pub fn build_router(services: &Services, api_cfg: &ApiConfig, timeout_sec: u64) -> Router {
    let accounts_api: Arc<dyn AccountsApi> =
        Arc::new(AccountsLocalClient::new(services.accounts.clone()));

    // Schedule routes sit behind the session middleware
    let schedule_routes = schedule::api::rest::routes::router(services.schedule.clone()).layer(
        middleware::from_fn_with_state(
            accounts_api.clone(),
            accounts::api::rest::auth::require_auth,
        ),
    );

    let mut router = Router::new()
        .route("/healthz", get(web::health_check))
        .nest(
            "/api/auth",
            accounts::api::rest::routes::router(services.accounts.clone()),
        )
        .nest("/api/schedules", schedule_routes);

    if api_cfg.enable_docs {
        router = router
            .route("/openapi.json", get(openapi::serve_openapi))
            .route("/docs", get(web::serve_docs));
    }

    if api_cfg.cors_enabled {
        let origins: Vec<HeaderValue> = api_cfg
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        );
    }

    if timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(timeout_sec)));
    }

    router
        .layer(middleware::from_fn(request_id::push_req_id_to_extensions))
        .layer(request_id::create_trace_layer())
        .layer(PropagateRequestIdLayer::new(request_id::header()))
        .layer(SetRequestIdLayer::new(request_id::header(), MakeReqId))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
