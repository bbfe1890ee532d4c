pub mod model;

pub use model::{EntryPatch, NewEntry, ScheduleEntry};
