use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Required field missing or empty: {field}")]
    RequiredFieldMissing { field: &'static str },

    #[error("Invalid time format: '{value}' (expected HH:mm)")]
    InvalidTimeFormat { value: String },

    #[error("Invalid time order: start {start} must be before end {end}")]
    InvalidTimeOrder { start: u16, end: u16 },

    #[error("Interval overlaps an existing schedule entry")]
    Overlap,

    #[error("Schedule entry not found: {id}")]
    EntryNotFound { id: Uuid },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn required_field(field: &'static str) -> Self {
        Self::RequiredFieldMissing { field }
    }

    pub fn invalid_time_format(value: impl Into<String>) -> Self {
        Self::InvalidTimeFormat {
            value: value.into(),
        }
    }

    pub fn invalid_time_order(start: u16, end: u16) -> Self {
        Self::InvalidTimeOrder { start, end }
    }

    pub fn entry_not_found(id: Uuid) -> Self {
        Self::EntryNotFound { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
