use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Build the auth router; the server nests it under `/api/auth`.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/session", get(handlers::session))
        .route("/change-password", post(handlers::change_password))
        .layer(Extension(service))
}
