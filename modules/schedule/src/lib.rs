//! Schedule module: per-user time-blocked entries with conflict management.
//!
//! Entries live on a single day as half-open `[start, end)` minute-of-day
//! intervals; for any one owner the stored set never contains two
//! intersecting intervals. The repository enforces that invariant as a
//! precondition of every create/update, serialized per owner.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
