use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{EntryPatch, NewEntry, ScheduleEntry};
use crate::domain::error::DomainError;
use crate::domain::repo::{EntryUpdate, RepoError, ScheduleRepository};
use crate::domain::time;

/// Domain service for schedule entries.
///
/// Runs the per-request pipeline: reject empty fields, parse wall-clock
/// times to minute-of-day, check interval order, then commit through the
/// repository (which owns the overlap precondition). Depends only on the
/// repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ScheduleRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn ScheduleRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "schedule.service.list_entries", skip(self), fields(owner_id = %owner_id))]
    pub async fn list_entries(&self, owner_id: Uuid) -> Result<Vec<ScheduleEntry>, DomainError> {
        debug!("Listing schedule entries");
        let entries = self.repo.list_by_owner(owner_id).await.map_err(map_repo)?;
        debug!("Listed {} entries", entries.len());
        Ok(entries)
    }

    #[instrument(
        name = "schedule.service.create_entry",
        skip(self, new_entry),
        fields(owner_id = %owner_id, title = %new_entry.title)
    )]
    pub async fn create_entry(
        &self,
        owner_id: Uuid,
        new_entry: NewEntry,
    ) -> Result<ScheduleEntry, DomainError> {
        info!("Creating schedule entry");

        require_non_empty("title", &new_entry.title)?;
        require_non_empty("start", &new_entry.start)?;
        require_non_empty("end", &new_entry.end)?;
        require_non_empty("color", &new_entry.color)?;

        let start_min = time::parse_hhmm(&new_entry.start)?;
        let end_min = time::parse_hhmm(&new_entry.end)?;
        check_order(start_min, end_min)?;

        let entry = self
            .repo
            .create(owner_id, new_entry.title, start_min, end_min, new_entry.color)
            .await
            .map_err(map_repo)?;

        info!("Successfully created entry with id={}", entry.id);
        Ok(entry)
    }

    #[instrument(
        name = "schedule.service.update_entry",
        skip(self, patch),
        fields(owner_id = %owner_id, entry_id = %id)
    )]
    pub async fn update_entry(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: EntryPatch,
    ) -> Result<ScheduleEntry, DomainError> {
        info!("Updating schedule entry");

        validate_patch(&patch)?;

        // Parse the patched times up front so a bad string never reaches
        // the repository.
        let patched_start = patch.start.as_deref().map(time::parse_hhmm).transpose()?;
        let patched_end = patch.end.as_deref().map(time::parse_hhmm).transpose()?;

        // Merge over the current entry; the repository re-checks overlap
        // (excluding this entry) atomically before committing.
        let current = self
            .repo
            .find_by_id(owner_id, id)
            .await
            .map_err(map_repo)?
            .ok_or_else(|| DomainError::entry_not_found(id))?;

        let start_min = patched_start.unwrap_or(current.start_min);
        let end_min = patched_end.unwrap_or(current.end_min);
        check_order(start_min, end_min)?;

        let update = EntryUpdate {
            title: patch.title.unwrap_or(current.title),
            start_min,
            end_min,
            color: patch.color.unwrap_or(current.color),
        };

        let entry = self
            .repo
            .update(owner_id, id, update)
            .await
            .map_err(|e| match e {
                RepoError::NotFound { id } => DomainError::entry_not_found(id),
                other => map_repo(other),
            })?;

        info!("Successfully updated entry");
        Ok(entry)
    }

    #[instrument(
        name = "schedule.service.delete_entry",
        skip(self),
        fields(owner_id = %owner_id, entry_id = %id)
    )]
    pub async fn delete_entry(&self, owner_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting schedule entry");

        self.repo.delete(owner_id, id).await.map_err(|e| match e {
            RepoError::NotFound { id } => DomainError::entry_not_found(id),
            other => map_repo(other),
        })?;

        info!("Successfully deleted entry");
        Ok(())
    }
}

// --- validation helpers ---

fn require_non_empty(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::required_field(field));
    }
    Ok(())
}

fn validate_patch(patch: &EntryPatch) -> Result<(), DomainError> {
    if let Some(ref title) = patch.title {
        require_non_empty("title", title)?;
    }
    if let Some(ref start) = patch.start {
        require_non_empty("start", start)?;
    }
    if let Some(ref end) = patch.end {
        require_non_empty("end", end)?;
    }
    if let Some(ref color) = patch.color {
        require_non_empty("color", color)?;
    }
    Ok(())
}

fn check_order(start_min: u16, end_min: u16) -> Result<(), DomainError> {
    if start_min >= end_min {
        return Err(DomainError::invalid_time_order(start_min, end_min));
    }
    Ok(())
}

fn map_repo(e: RepoError) -> DomainError {
    match e {
        RepoError::NotFound { id } => DomainError::entry_not_found(id),
        RepoError::Conflict => DomainError::Overlap,
        RepoError::Database(err) => DomainError::database(err.to_string()),
    }
}
