use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::contract::model::{EntryPatch, NewEntry, ScheduleEntry};
use crate::domain::time;

/// REST DTO for a schedule entry; times are formatted "HH:mm" for display.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleEntryDto {
    pub id: Uuid,
    pub title: String,
    #[schema(example = "09:00")]
    pub start: String,
    #[schema(example = "09:30")]
    pub end: String,
    #[schema(example = "#0af")]
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating an entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEntryReq {
    pub title: String,
    #[schema(example = "09:00")]
    pub start: String,
    #[schema(example = "09:30")]
    pub end: String,
    pub color: String,
}

/// REST DTO for updating an entry (partial)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateEntryReq {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub color: Option<String>,
}

/// REST DTO for the entry list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryListDto {
    pub entries: Vec<ScheduleEntryDto>,
    pub total: usize,
}

// Conversion implementations between REST DTOs and contract models

impl From<ScheduleEntry> for ScheduleEntryDto {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            start: time::format_hhmm(entry.start_min),
            end: time::format_hhmm(entry.end_min),
            color: entry.color,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

impl From<CreateEntryReq> for NewEntry {
    fn from(req: CreateEntryReq) -> Self {
        Self {
            title: req.title,
            start: req.start,
            end: req.end,
            color: req.color,
        }
    }
}

impl From<UpdateEntryReq> for EntryPatch {
    fn from(req: UpdateEntryReq) -> Self {
        Self {
            title: req.title,
            start: req.start,
            end: req.end,
            color: req.color,
        }
    }
}
