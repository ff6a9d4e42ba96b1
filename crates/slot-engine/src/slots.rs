//! Search for meeting start times inside daily working hours.
//!
//! A cursor walks from the range start. Each step looks at the rest of the
//! current working day, finds the first busy interval still ahead of the cursor,
//! and reports the cursor when the gap before that interval (or before the end
//! of the day) is long enough. Only the start of each gap is reported.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::merge::MergedBusySet;
use crate::window::WorkingWindow;

/// A proposed meeting start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    /// Where the free gap opened by `start` ends: the next busy interval or the
    /// end of the working day.
    pub free_until: DateTime<Utc>,
}

impl CandidateSlot {
    pub fn free_minutes(&self) -> i64 {
        (self.free_until - self.start).num_minutes()
    }
}

/// Find every free gap of at least `duration_minutes` between `range_start` and
/// `range_end`, restricted to the working window of each day.
///
/// # Errors
/// Returns `SlotError::InvalidArgument` if `duration_minutes <= 0` or if
/// `range_start >= range_end`.
pub fn find_slots(
    busy: &MergedBusySet,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    duration_minutes: i64,
    window: &WorkingWindow,
) -> Result<Vec<CandidateSlot>> {
    if duration_minutes <= 0 {
        return Err(SlotError::InvalidArgument(format!(
            "duration must be positive, got {} minutes",
            duration_minutes
        )));
    }
    if range_start >= range_end {
        return Err(SlotError::InvalidArgument(format!(
            "range start {} is not before range end {}",
            range_start.to_rfc3339(),
            range_end.to_rfc3339()
        )));
    }
    let duration = Duration::try_minutes(duration_minutes).ok_or_else(|| {
        SlotError::InvalidArgument(format!(
            "duration of {} minutes is too large",
            duration_minutes
        ))
    })?;

    let intervals = busy.as_slice();
    let mut slots = Vec::new();
    // Index of the first interval that might still end after the cursor. Merged
    // intervals have non-decreasing ends and the cursor never moves back.
    let mut ahead = 0;
    let mut check = range_start;

    while check < range_end {
        let date = window.local_date(check);
        check = check.max(window.day_start(date));
        let day_end = window.day_end(date);

        while ahead < intervals.len() && intervals[ahead].end <= check {
            ahead += 1;
        }
        let blocking = intervals.get(ahead).filter(|i| i.start < day_end);

        let free_until = blocking.map_or(day_end, |i| i.start);
        if free_until - check >= duration {
            slots.push(CandidateSlot {
                start: check,
                free_until,
            });
        }

        check = check.max(blocking.map_or(day_end, |i| i.end));

        if check >= day_end {
            match date.succ_opt() {
                Some(next_day) => check = check.max(window.day_start(next_day)),
                None => break,
            }
        }
    }

    Ok(slots)
}
