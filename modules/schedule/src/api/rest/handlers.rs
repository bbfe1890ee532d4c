use axum::{
    extract::Path,
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{error, info};
use uuid::Uuid;

use accounts::contract::model::AuthContext;
use api_core::problem::ProblemResponse;

use crate::api::rest::dto::{CreateEntryReq, EntryListDto, ScheduleEntryDto, UpdateEntryReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;

/// List the authenticated owner's schedule entries
#[utoipa::path(
    get,
    path = "/api/schedules",
    tag = "schedule",
    responses(
        (status = 200, description = "Schedule entries ordered by start time", body = EntryListDto),
        (status = 401, description = "Unauthorized", body = api_core::Problem),
    )
)]
pub async fn list_entries(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Extension(auth): Extension<AuthContext>,
    uri: Uri,
) -> Result<Json<EntryListDto>, ProblemResponse> {
    info!("Listing schedule entries for {}", auth.account_id);

    match svc.list_entries(auth.account_id).await {
        Ok(entries) => {
            let entries: Vec<ScheduleEntryDto> =
                entries.into_iter().map(ScheduleEntryDto::from).collect();
            let total = entries.len();
            Ok(Json(EntryListDto { entries, total }))
        }
        Err(e) => {
            error!("Failed to list entries: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a new schedule entry
#[utoipa::path(
    post,
    path = "/api/schedules",
    tag = "schedule",
    request_body = CreateEntryReq,
    responses(
        (status = 201, description = "Created entry", body = ScheduleEntryDto),
        (status = 400, description = "Bad Request", body = api_core::Problem),
        (status = 401, description = "Unauthorized", body = api_core::Problem),
        (status = 409, description = "Overlapping interval", body = api_core::Problem),
    )
)]
pub async fn create_entry(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Extension(auth): Extension<AuthContext>,
    uri: Uri,
    Json(req_body): Json<CreateEntryReq>,
) -> Result<(StatusCode, Json<ScheduleEntryDto>), ProblemResponse> {
    info!("Creating schedule entry: {:?}", req_body);

    match svc.create_entry(auth.account_id, req_body.into()).await {
        Ok(entry) => Ok((StatusCode::CREATED, Json(ScheduleEntryDto::from(entry)))),
        Err(e) => {
            error!("Failed to create entry: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Update an existing schedule entry with partial data
#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    tag = "schedule",
    params(("id" = Uuid, Path, description = "Entry UUID")),
    request_body = UpdateEntryReq,
    responses(
        (status = 200, description = "Updated entry", body = ScheduleEntryDto),
        (status = 400, description = "Bad Request", body = api_core::Problem),
        (status = 401, description = "Unauthorized", body = api_core::Problem),
        (status = 404, description = "Not Found", body = api_core::Problem),
        (status = 409, description = "Overlapping interval", body = api_core::Problem),
    )
)]
pub async fn update_entry(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    uri: Uri,
    Json(req_body): Json<UpdateEntryReq>,
) -> Result<Json<ScheduleEntryDto>, ProblemResponse> {
    info!("Updating schedule entry {} with: {:?}", id, req_body);

    match svc.update_entry(auth.account_id, id, req_body.into()).await {
        Ok(entry) => Ok(Json(ScheduleEntryDto::from(entry))),
        Err(e) => {
            error!("Failed to update entry {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete a schedule entry
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    tag = "schedule",
    params(("id" = Uuid, Path, description = "Entry UUID")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Unauthorized", body = api_core::Problem),
        (status = 404, description = "Not Found", body = api_core::Problem),
    )
)]
pub async fn delete_entry(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting schedule entry: {}", id);

    match svc.delete_entry(auth.account_id, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete entry {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
