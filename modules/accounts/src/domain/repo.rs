use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::model::AccountRecord;

/// Uniqueness violations the durable store reports when a concurrent
/// writer slips past the service's pre-check.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("unique constraint violated on username")]
    UsernameTaken,

    #[error("unique constraint violated on email")]
    EmailTaken,

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Port for the domain layer: persistence operations the domain needs.
#[async_trait]
pub trait AccountsRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccountRecord>, RepoError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, RepoError>;
    async fn username_exists(&self, username: &str) -> Result<bool, RepoError>;
    async fn email_exists(&self, email: &str) -> Result<bool, RepoError>;
    /// Insert a fully-formed account record.
    ///
    /// Service computes id/timestamps/hash; repo persists. The unique
    /// indexes are the backstop for concurrent signups.
    async fn insert(&self, record: AccountRecord) -> Result<(), RepoError>;
    /// Replace the stored password hash. Returns false when the account
    /// does not exist.
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: String,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, RepoError>;
}
