use crate::domain::model::AccountRecord;
use crate::infra::storage::entity::Model as AccountEntity;

/// Convert a database entity to the domain record
pub fn entity_to_record(entity: AccountEntity) -> AccountRecord {
    AccountRecord {
        id: entity.id,
        username: entity.username,
        email: entity.email,
        password_hash: entity.password_hash,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}
