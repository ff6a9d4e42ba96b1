//! Calendar provider trait and the typed values that cross it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::BusyInterval;

use crate::error::Result;
use crate::session::Session;

/// The signed-in user's permission on a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessRole {
    FreeBusyReader,
    Reader,
    Writer,
    Owner,
    #[serde(other)]
    Unknown,
}

impl AccessRole {
    /// Roles whose calendars are offered as attendees.
    pub fn is_readable(self) -> bool {
        matches!(self, AccessRole::Reader | AccessRole::Writer | AccessRole::Owner)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessRole::FreeBusyReader => "freeBusyReader",
            AccessRole::Reader => "reader",
            AccessRole::Writer => "writer",
            AccessRole::Owner => "owner",
            AccessRole::Unknown => "unknown",
        }
    }
}

/// One calendar identity visible to the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub access_role: AccessRole,
    #[serde(default)]
    pub primary: bool,
}

/// A free/busy lookup for several calendars over one time range.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeBusyQuery {
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    /// IANA name the provider should interpret the range in.
    pub time_zone: String,
    pub calendar_ids: Vec<String>,
}

/// Busy intervals reported for one calendar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarBusy {
    #[serde(default)]
    pub busy: Vec<BusyInterval>,
    /// Provider-side reasons the calendar could not be read (e.g. `notFound`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Busy data for each queried calendar, keyed by calendar id.
pub type FreeBusyResult = BTreeMap<String, CalendarBusy>;

/// A source of calendar listings and free/busy data.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Every calendar the session's user can see, regardless of role.
    async fn list_calendars(&self, session: &Session) -> Result<Vec<CalendarEntry>>;

    /// Busy intervals per calendar within the query's range.
    async fn free_busy(&self, session: &Session, query: &FreeBusyQuery) -> Result<FreeBusyResult>;
}
