use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::ScheduleEntry;

/// Outcomes of repository operations the service maps onto domain errors.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("schedule entry not found: {id}")]
    NotFound { id: Uuid },

    #[error("interval overlaps an existing entry for this owner")]
    Conflict,

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Fully-specified replacement values for an update commit.
///
/// The service merges the client patch over the current entry and
/// validates the merged interval before handing it here.
#[derive(Debug, Clone)]
pub struct EntryUpdate {
    pub title: String,
    pub start_min: u16,
    pub end_min: u16,
    pub color: String,
}

/// Port for the domain layer: the durable per-owner entry collection.
///
/// Implementations own id/timestamp assignment and must make the
/// overlap-check-then-commit sequence of `create`/`update` atomic with
/// respect to concurrent writers for the same owner. Every operation is
/// scoped to `owner_id`; another owner's entries are never read or
/// mutated.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// List one owner's entries ordered by `start_min` ascending, ties
    /// broken by `created_at` descending, then `id` descending.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ScheduleEntry>, RepoError>;

    /// Load one entry, owner-scoped. Absent and not-owned are the same `None`.
    async fn find_by_id(&self, owner_id: Uuid, id: Uuid)
        -> Result<Option<ScheduleEntry>, RepoError>;

    /// Insert a new entry with a fresh id and timestamps.
    /// Fails with [`RepoError::Conflict`] when the interval overlaps the
    /// owner's current set.
    async fn create(
        &self,
        owner_id: Uuid,
        title: String,
        start_min: u16,
        end_min: u16,
        color: String,
    ) -> Result<ScheduleEntry, RepoError>;

    /// Replace an entry's fields, re-checking the overlap invariant with
    /// the entry itself excluded. A failed commit leaves the stored set
    /// unchanged.
    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        update: EntryUpdate,
    ) -> Result<ScheduleEntry, RepoError>;

    /// Remove an entry. Fails with [`RepoError::NotFound`] when absent
    /// for this owner.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), RepoError>;
}
