//! SeaORM-backed repository implementation for the accounts port.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::domain::model::AccountRecord;
use crate::domain::repo::{AccountsRepository, RepoError};
use crate::infra::storage::entity::{ActiveModel as AccountAM, Column, Entity as AccountEntity};
use crate::infra::storage::mapper::entity_to_record;

pub struct SeaOrmAccountsRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Classify a driver error for a duplicate-key insert. SQLite and
/// Postgres both name the column in the constraint message.
fn classify_unique_violation(err: &DbErr) -> Option<RepoError> {
    let message = err.to_string();
    if !message.to_ascii_uppercase().contains("UNIQUE") {
        return None;
    }
    if message.contains("username") {
        Some(RepoError::UsernameTaken)
    } else if message.contains("email") {
        Some(RepoError::EmailTaken)
    } else {
        Some(RepoError::UsernameTaken)
    }
}

#[async_trait]
impl AccountsRepository for SeaOrmAccountsRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccountRecord>, RepoError> {
        let found = AccountEntity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(entity_to_record))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountRecord>, RepoError> {
        let found = AccountEntity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find_by_username failed")?;
        Ok(found.map(entity_to_record))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, RepoError> {
        let count = AccountEntity::find()
            .filter(Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("username_exists failed")?;
        Ok(count > 0)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepoError> {
        let count = AccountEntity::find()
            .filter(Column::Email.eq(email))
            .count(&self.db)
            .await
            .context("email_exists failed")?;
        Ok(count > 0)
    }

    async fn insert(&self, record: AccountRecord) -> Result<(), RepoError> {
        let model = AccountAM {
            id: Set(record.id),
            username: Set(record.username),
            email: Set(record.email),
            password_hash: Set(record.password_hash),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        };
        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) => match classify_unique_violation(&e) {
                Some(repo_err) => Err(repo_err),
                None => Err(anyhow::Error::new(e).context("insert failed").into()),
            },
        }
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: String,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, RepoError> {
        let model = AccountAM {
            id: Set(id),
            password_hash: Set(password_hash),
            updated_at: Set(updated_at),
            ..Default::default()
        };
        match model.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e).context("update_password failed").into()),
        }
    }
}
