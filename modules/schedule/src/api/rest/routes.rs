use axum::{
    routing::{get, put},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Build the schedule router. The server nests it under `/api/schedules`
/// behind the session middleware, so every handler can rely on an
/// `AuthContext` being present in request extensions.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/{id}",
            put(handlers::update_entry).delete(handlers::delete_entry),
        )
        .layer(Extension(service))
}
