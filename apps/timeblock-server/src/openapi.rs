use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timeblock API",
        description = "Multi-user time-blocked schedule board",
        version = "0.1.0"
    ),
    paths(
        accounts::api::rest::handlers::signup,
        accounts::api::rest::handlers::login,
        accounts::api::rest::handlers::logout,
        accounts::api::rest::handlers::session,
        accounts::api::rest::handlers::change_password,
        schedule::api::rest::handlers::list_entries,
        schedule::api::rest::handlers::create_entry,
        schedule::api::rest::handlers::update_entry,
        schedule::api::rest::handlers::delete_entry,
    ),
    components(schemas(api_core::Problem)),
    tags(
        (name = "auth", description = "Accounts and sessions"),
        (name = "schedule", description = "Per-user schedule entries")
    )
)]
pub struct ApiDoc;

pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
