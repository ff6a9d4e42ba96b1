//! Human-readable rendering of candidate slots, done only at the boundary.

use chrono::{DateTime, FixedOffset, Utc};
use slot_engine::CandidateSlot;

/// Medium date, short time: `2024/01/05 9:30`.
const SLOT_FORMAT: &str = "%Y/%m/%d %-H:%M";

pub fn format_instant(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format(SLOT_FORMAT).to_string()
}

pub fn format_slots(slots: &[CandidateSlot], offset: FixedOffset) -> Vec<String> {
    slots
        .iter()
        .map(|slot| format_instant(slot.start, offset))
        .collect()
}
