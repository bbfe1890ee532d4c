use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone)]
pub enum AccountsError {
    #[error("session missing or expired")]
    Unauthorized,

    #[error("Internal error")]
    Internal,
}
