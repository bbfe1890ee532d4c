//! In-memory repository satisfying the same per-owner atomicity contract
//! as the SeaORM implementation. Used by unit tests as the reference
//! implementation of the repository port.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::contract::model::ScheduleEntry;
use crate::domain::overlap;
use crate::domain::repo::{EntryUpdate, RepoError, ScheduleRepository};

#[derive(Default)]
pub struct InMemoryScheduleRepository {
    // Whole operations run under the write lock, which trivially
    // serializes check-then-commit (for all owners, which the contract
    // permits; it only requires per-owner).
    entries: RwLock<HashMap<Uuid, Vec<ScheduleEntry>>>,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ScheduleEntry>, RepoError> {
        let map = self.entries.read();
        let mut entries = map.get(&owner_id).cloned().unwrap_or_default();
        entries.sort_by(|a, b| {
            a.start_min
                .cmp(&b.start_min)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    async fn find_by_id(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ScheduleEntry>, RepoError> {
        let map = self.entries.read();
        Ok(map
            .get(&owner_id)
            .and_then(|list| list.iter().find(|e| e.id == id))
            .cloned())
    }

    async fn create(
        &self,
        owner_id: Uuid,
        title: String,
        start_min: u16,
        end_min: u16,
        color: String,
    ) -> Result<ScheduleEntry, RepoError> {
        let mut map = self.entries.write();
        let list = map.entry(owner_id).or_default();

        if overlap::conflicts(start_min, end_min, list, None) {
            return Err(RepoError::Conflict);
        }

        let now = Utc::now();
        let entry = ScheduleEntry {
            id: Uuid::new_v4(),
            owner_id,
            title,
            start_min,
            end_min,
            color,
            created_at: now,
            updated_at: now,
        };
        list.push(entry.clone());
        Ok(entry)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        update: EntryUpdate,
    ) -> Result<ScheduleEntry, RepoError> {
        let mut map = self.entries.write();
        let list = map.entry(owner_id).or_default();

        let pos = match list.iter().position(|e| e.id == id) {
            Some(pos) => pos,
            None => return Err(RepoError::NotFound { id }),
        };
        if overlap::conflicts(update.start_min, update.end_min, list, Some(id)) {
            return Err(RepoError::Conflict);
        }

        let entry = &mut list[pos];
        entry.title = update.title;
        entry.start_min = update.start_min;
        entry.end_min = update.end_min;
        entry.color = update.color;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let mut map = self.entries.write();
        let list = map.entry(owner_id).or_default();
        let before = list.len();
        list.retain(|e| e.id != id);
        if list.len() == before {
            return Err(RepoError::NotFound { id });
        }
        Ok(())
    }
}
