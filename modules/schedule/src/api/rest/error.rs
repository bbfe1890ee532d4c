use api_core::problem::{from_parts, ProblemResponse};
use axum::http::StatusCode;

use crate::domain::error::DomainError;

/// Map domain errors to RFC 9457 problem responses with stable codes.
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::RequiredFieldMissing { field } => from_parts(
            StatusCode::BAD_REQUEST,
            "REQUIRED_FIELD_MISSING",
            "Validation error",
            format!("Required field missing or empty: {field}"),
            instance,
        ),
        DomainError::InvalidTimeFormat { value } => from_parts(
            StatusCode::BAD_REQUEST,
            "INVALID_TIME_FORMAT",
            "Invalid time format",
            format!("'{value}' is not a valid HH:mm time"),
            instance,
        ),
        DomainError::InvalidTimeOrder { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "INVALID_TIME_ORDER",
            "Invalid time order",
            "Start time must be before end time",
            instance,
        ),
        DomainError::Overlap => from_parts(
            StatusCode::CONFLICT,
            "SCHEDULE_OVERLAP",
            "Schedule overlap",
            "The interval overlaps an existing schedule entry",
            instance,
        ),
        DomainError::EntryNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "SCHEDULE_NOT_FOUND",
            "Schedule entry not found",
            format!("Schedule entry {id} was not found"),
            instance,
        ),
        DomainError::Database { .. } => {
            // Log the internal details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}
