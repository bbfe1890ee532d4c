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
        DomainError::InvalidEmail { email } => from_parts(
            StatusCode::BAD_REQUEST,
            "INVALID_EMAIL",
            "Invalid email",
            format!("Email '{email}' is invalid"),
            instance,
        ),
        DomainError::UserAlreadyExists { username } => from_parts(
            StatusCode::CONFLICT,
            "USER_ALREADY_EXISTS",
            "Username taken",
            format!("Username '{username}' is already taken"),
            instance,
        ),
        DomainError::EmailAlreadyRegistered { email } => from_parts(
            StatusCode::CONFLICT,
            "EMAIL_ALREADY_REGISTERED",
            "Email already registered",
            format!("Email '{email}' is already registered"),
            instance,
        ),
        DomainError::InvalidCredentials => from_parts(
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "Invalid credentials",
            "Username or password is incorrect",
            instance,
        ),
        DomainError::TooManyAttempts { retry_after_secs } => from_parts(
            StatusCode::TOO_MANY_REQUESTS,
            "TOO_MANY_ATTEMPTS",
            "Too many attempts",
            format!("Too many login attempts; retry in {retry_after_secs} seconds"),
            instance,
        ),
        DomainError::SessionExpired => from_parts(
            StatusCode::UNAUTHORIZED,
            "SESSION_EXPIRED",
            "Session expired",
            "The session is missing or has expired",
            instance,
        ),
        DomainError::AccountNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "ACCOUNT_NOT_FOUND",
            "Account not found",
            format!("Account {id} was not found"),
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
