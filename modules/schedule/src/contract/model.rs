use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure schedule entry model for inter-module communication (no serde).
///
/// `start_min`/`end_min` are minute-of-day in `[0, 1440)` with
/// `start_min < end_min`; the interval is half-open `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub start_min: u16,
    pub end_min: u16,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new entry; times are wall-clock "HH:mm" strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub start: String,
    pub end: String,
    pub color: String,
}

/// Partial update data for an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub color: Option<String>,
}
