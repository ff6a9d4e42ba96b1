//! Daily working-hour window in a fixed reference offset.

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Timelike, Utc,
};

use crate::error::{Result, SlotError};

/// The local-time range `[start_hour:00, end_hour:00)` during which meetings
/// may be scheduled, repeated every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    start_hour: u32,
    end_hour: u32,
    offset: FixedOffset,
}

impl WorkingWindow {
    /// # Errors
    /// Returns `SlotError::InvalidArgument` unless `start_hour < end_hour <= 24`.
    pub fn new(start_hour: u32, end_hour: u32, offset: FixedOffset) -> Result<Self> {
        if end_hour > 24 || start_hour >= end_hour {
            return Err(SlotError::InvalidArgument(format!(
                "working window {}:00-{}:00 must satisfy start < end <= 24",
                start_hour, end_hour
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
            offset,
        })
    }

    /// A window evaluated in UTC.
    pub fn utc(start_hour: u32, end_hour: u32) -> Result<Self> {
        Self::new(start_hour, end_hour, Utc.fix())
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn hours(&self) -> i64 {
        i64::from(self.end_hour - self.start_hour)
    }

    /// The calendar day an instant falls on in the reference offset.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// `start_hour:00` on the given local day, as a UTC instant.
    pub fn day_start(&self, date: NaiveDate) -> DateTime<Utc> {
        self.at_hour(date, self.start_hour)
    }

    /// `end_hour:00` on the given local day, as a UTC instant.
    pub fn day_end(&self, date: NaiveDate) -> DateTime<Utc> {
        self.at_hour(date, self.end_hour)
    }

    /// True when the instant's local time is inside `[start_hour, end_hour)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&self.offset);
        let hour = local.hour();
        hour >= self.start_hour && hour < self.end_hour
    }

    fn at_hour(&self, date: NaiveDate, hour: u32) -> DateTime<Utc> {
        let local: NaiveDateTime = date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(hour));
        let utc = local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&utc)
    }
}
