//! Overlap detection for half-open minute-of-day intervals.

use uuid::Uuid;

use crate::contract::model::ScheduleEntry;

/// Two half-open intervals `[s1, e1)` and `[s2, e2)` intersect iff
/// `s1 < e2 && s2 < e1`. Touching intervals (`e1 == s2`) do not:
/// back-to-back scheduling is legal.
pub fn intervals_overlap(s1: u16, e1: u16, s2: u16, e2: u16) -> bool {
    s1 < e2 && s2 < e1
}

/// Whether the candidate `[start, end)` conflicts with any of `entries`.
///
/// `exclude` omits one entry from the comparison set (the update path:
/// an entry never conflicts with itself). The caller supplies a single
/// owner's entries; cross-owner entries are invisible by construction.
pub fn conflicts(
    start: u16,
    end: u16,
    entries: &[ScheduleEntry],
    exclude: Option<Uuid>,
) -> bool {
    entries
        .iter()
        .filter(|e| exclude != Some(e.id))
        .any(|e| intervals_overlap(start, end, e.start_min, e.end_min))
}
