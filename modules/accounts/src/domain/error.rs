use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Required field missing or empty: {field}")]
    RequiredFieldMissing { field: &'static str },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Username '{username}' is already taken")]
    UserAlreadyExists { username: String },

    #[error("Email '{email}' is already registered")]
    EmailAlreadyRegistered { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Too many login attempts; retry in {retry_after_secs}s")]
    TooManyAttempts { retry_after_secs: u64 },

    #[error("Session missing or expired")]
    SessionExpired,

    #[error("Account not found: {id}")]
    AccountNotFound { id: Uuid },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn required_field(field: &'static str) -> Self {
        Self::RequiredFieldMissing { field }
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn user_already_exists(username: impl Into<String>) -> Self {
        Self::UserAlreadyExists {
            username: username.into(),
        }
    }

    pub fn email_already_registered(email: impl Into<String>) -> Self {
        Self::EmailAlreadyRegistered {
            email: email.into(),
        }
    }

    pub fn account_not_found(id: Uuid) -> Self {
        Self::AccountNotFound { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
