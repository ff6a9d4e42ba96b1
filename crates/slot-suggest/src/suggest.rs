//! Request-scoped orchestration: list calendars, query free/busy, propose slots.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::Serialize;
use slot_engine::{find_slots, merge_streams, CandidateSlot, WorkingWindow};
use tracing::{debug, info};

use crate::config::SuggestConfig;
use crate::error::{Result, SuggestError};
use crate::provider::{CalendarEntry, CalendarProvider, FreeBusyQuery, FreeBusyResult};
use crate::session::Session;

const LAST_SECOND: NaiveTime = NaiveTime::from_hms_opt(23, 59, 59).unwrap();

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestRequest {
    /// Calendar ids to check besides the signed-in user's own.
    pub attendees: Vec<String>,
    /// First local day to search (inclusive).
    pub start_date: NaiveDate,
    /// Last local day to search (inclusive).
    pub end_date: NaiveDate,
    pub duration_minutes: i64,
}

/// Proposed start times plus the busy data they were computed from.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub slots: Vec<CandidateSlot>,
    pub calendars: FreeBusyResult,
    pub range_start: DateTime<Utc>,
    pub range_end: DateTime<Utc>,
    /// Offset the working window was evaluated in; use it to display slots.
    #[serde(skip)]
    pub offset: FixedOffset,
}

/// Split a comma-separated attendee list, dropping blanks.
pub fn parse_attendees(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct Suggester<P> {
    provider: P,
    config: SuggestConfig,
}

impl<P: CalendarProvider> Suggester<P> {
    pub fn new(provider: P, config: SuggestConfig) -> Self {
        Self { provider, config }
    }

    /// Calendars whose busy data the user can read.
    pub async fn list_calendars(&self, session: &Session) -> Result<Vec<CalendarEntry>> {
        session.access_token()?;
        let calendars = self.provider.list_calendars(session).await?;
        let total = calendars.len();
        let readable: Vec<CalendarEntry> = calendars
            .into_iter()
            .filter(|c| c.access_role.is_readable())
            .collect();
        debug!(total, readable = readable.len(), "filtered calendar list");
        Ok(readable)
    }

    /// Propose meeting start times for the signed-in user and the requested
    /// attendees. An empty `slots` list is a valid answer.
    pub async fn suggest(&self, session: &Session, request: &SuggestRequest) -> Result<Suggestion> {
        session.access_token()?;

        if request.duration_minutes <= 0 {
            return Err(SuggestError::InvalidArgument(format!(
                "duration must be positive, got {} minutes",
                request.duration_minutes
            )));
        }
        if request.start_date > request.end_date {
            return Err(SuggestError::InvalidArgument(format!(
                "start date {} is after end date {}",
                request.start_date, request.end_date
            )));
        }

        let calendar_ids = attendee_ids(session, &request.attendees);
        if calendar_ids.is_empty() {
            return Err(SuggestError::InvalidArgument("no attendees to check".to_string()));
        }

        let offset = self.range_offset(request.start_date)?;
        let range_start = local_instant(offset, request.start_date, NaiveTime::MIN)?;
        let range_end = local_instant(offset, request.end_date, LAST_SECOND)?;
        let window = WorkingWindow::new(
            self.config.work_start_hour,
            self.config.work_end_hour,
            offset,
        )?;

        info!(
            attendees = calendar_ids.len(),
            start = %request.start_date,
            end = %request.end_date,
            duration = request.duration_minutes,
            work_start = window.start_hour(),
            work_end = window.end_hour(),
            offset = %window.offset(),
            "searching for meeting slots"
        );

        let query = FreeBusyQuery {
            time_min: range_start,
            time_max: range_end,
            time_zone: self.config.time_zone.name().to_string(),
            calendar_ids,
        };
        let calendars = self.provider.free_busy(session, &query).await?;

        let busy = merge_streams(calendars.values().map(|cal| cal.busy.as_slice()));
        debug!(merged = busy.len(), "merged busy intervals");

        let slots = find_slots(
            &busy,
            range_start,
            range_end,
            request.duration_minutes,
            &window,
        )?;
        info!(slots = slots.len(), "slot search finished");

        Ok(Suggestion {
            slots,
            calendars,
            range_start,
            range_end,
            offset,
        })
    }

    /// The reference timezone's offset at local midnight of the first day.
    fn range_offset(&self, date: NaiveDate) -> Result<FixedOffset> {
        let tz = self.config.time_zone;
        tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
            .earliest()
            .map(|dt| dt.offset().fix())
            .ok_or_else(|| {
                SuggestError::InvalidArgument(format!("{} has no midnight in {}", date, tz.name()))
            })
    }
}

/// The signed-in user first, then the requested attendees, without repeats.
fn attendee_ids(session: &Session, attendees: &[String]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::with_capacity(attendees.len() + 1);
    for id in session
        .user_email()
        .into_iter()
        .chain(attendees.iter().map(String::as_str))
    {
        let id = id.trim();
        if !id.is_empty() && !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

fn local_instant(offset: FixedOffset, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>> {
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| SuggestError::InvalidArgument(format!("{} {} is out of range", date, time)))
}
