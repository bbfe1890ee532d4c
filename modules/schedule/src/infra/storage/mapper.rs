use crate::contract::model::ScheduleEntry;
use crate::infra::storage::entity::Model as EntryEntity;

/// Convert a database entity to a contract model
pub fn entity_to_contract(entity: EntryEntity) -> ScheduleEntry {
    ScheduleEntry {
        id: entity.id,
        owner_id: entity.owner_id,
        title: entity.title,
        start_min: entity.start_min as u16,
        end_min: entity.end_min as u16,
        color: entity.color,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}
