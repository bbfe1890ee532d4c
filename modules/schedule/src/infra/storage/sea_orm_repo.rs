//! SeaORM-backed repository implementation for the domain port.
//!
//! Same-owner writers are serialized: each owner has a lazily-created
//! async mutex guarding the overlap-check-then-commit sequence, and the
//! check plus the write run inside one transaction so a failed commit
//! never leaves a partial state behind. Different owners proceed in
//! parallel.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::contract::model::ScheduleEntry;
use crate::domain::repo::{EntryUpdate, RepoError, ScheduleRepository};
use crate::infra::storage::entity::{ActiveModel as EntryAM, Column, Entity as EntryEntity};
use crate::infra::storage::mapper::entity_to_contract;

pub struct SeaOrmScheduleRepository {
    db: DatabaseConnection,
    owner_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl SeaOrmScheduleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            owner_locks: DashMap::new(),
        }
    }

    fn owner_lock(&self, owner_id: Uuid) -> Arc<Mutex<()>> {
        self.owner_locks
            .entry(owner_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Count entries of `owner_id` whose `[start, end)` intersects the
/// candidate, optionally excluding one entry id (the update path).
async fn conflict_count<C: sea_orm::ConnectionTrait>(
    conn: &C,
    owner_id: Uuid,
    start_min: i16,
    end_min: i16,
    exclude: Option<Uuid>,
) -> Result<u64, RepoError> {
    let mut query = EntryEntity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .filter(Column::StartMin.lt(end_min))
        .filter(Column::EndMin.gt(start_min));
    if let Some(id) = exclude {
        query = query.filter(Column::Id.ne(id));
    }
    let count = query.count(conn).await.context("conflict count failed")?;
    Ok(count)
}

#[async_trait]
impl ScheduleRepository for SeaOrmScheduleRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ScheduleEntry>, RepoError> {
        let rows = EntryEntity::find()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_asc(Column::StartMin)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .context("list_by_owner failed")?;
        Ok(rows.into_iter().map(entity_to_contract).collect())
    }

    async fn find_by_id(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ScheduleEntry>, RepoError> {
        let found = EntryEntity::find_by_id(id)
            .filter(Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(entity_to_contract))
    }

    async fn create(
        &self,
        owner_id: Uuid,
        title: String,
        start_min: u16,
        end_min: u16,
        color: String,
    ) -> Result<ScheduleEntry, RepoError> {
        let lock = self.owner_lock(owner_id);
        let _guard = lock.lock().await;

        let txn = self.db.begin().await.context("begin failed")?;

        if conflict_count(&txn, owner_id, start_min as i16, end_min as i16, None).await? > 0 {
            txn.rollback().await.context("rollback failed")?;
            return Err(RepoError::Conflict);
        }

        let now = Utc::now();
        let model = EntryAM {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            title: Set(title),
            start_min: Set(start_min as i16),
            end_min: Set(end_min as i16),
            color: Set(color),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = model.insert(&txn).await.context("insert failed")?;

        txn.commit().await.context("commit failed")?;
        Ok(entity_to_contract(inserted))
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        update: EntryUpdate,
    ) -> Result<ScheduleEntry, RepoError> {
        let lock = self.owner_lock(owner_id);
        let _guard = lock.lock().await;

        let txn = self.db.begin().await.context("begin failed")?;

        let current = EntryEntity::find_by_id(id)
            .filter(Column::OwnerId.eq(owner_id))
            .one(&txn)
            .await
            .context("load for update failed")?;
        if current.is_none() {
            txn.rollback().await.context("rollback failed")?;
            return Err(RepoError::NotFound { id });
        }

        let start_min = update.start_min as i16;
        let end_min = update.end_min as i16;
        if conflict_count(&txn, owner_id, start_min, end_min, Some(id)).await? > 0 {
            txn.rollback().await.context("rollback failed")?;
            return Err(RepoError::Conflict);
        }

        let model = EntryAM {
            id: Set(id),
            title: Set(update.title),
            start_min: Set(start_min),
            end_min: Set(end_min),
            color: Set(update.color),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let updated = model.update(&txn).await.context("update failed")?;

        txn.commit().await.context("commit failed")?;
        Ok(entity_to_contract(updated))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let result = EntryEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await
            .context("delete failed")?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound { id });
        }
        Ok(())
    }
}
