//! Busy intervals as reported by a calendar provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` range during which an attendee is unavailable.
///
/// Intervals are anonymous values. An inverted input (`end < start`) is kept as
/// the single instant `[start, start]` rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawInterval")]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl From<RawInterval> for BusyInterval {
    fn from(raw: RawInterval) -> Self {
        BusyInterval::new(raw.start, raw.end)
    }
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// True when the interval covers no time at all.
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Two intervals overlap when `a.start < b.end && b.start < a.end`.
    ///
    /// Touching intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &BusyInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}
