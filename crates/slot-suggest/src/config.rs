//! Runtime configuration for suggestion requests.
//!
//! Priority: CLI flags > environment (including `.env`) > defaults.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use std::env;
use url::Url;

use crate::error::{Result, SuggestError};
use crate::google::GOOGLE_CALENDAR_API_BASE;

pub const ENV_API_BASE: &str = "SLOTS_API_BASE";
pub const ENV_TIME_ZONE: &str = "SLOTS_TIME_ZONE";
pub const ENV_WORK_START_HOUR: &str = "SLOTS_WORK_START_HOUR";
pub const ENV_WORK_END_HOUR: &str = "SLOTS_WORK_END_HOUR";

const DEFAULT_TIME_ZONE: Tz = chrono_tz::Asia::Tokyo;
const DEFAULT_WORK_START_HOUR: u32 = 9;
const DEFAULT_WORK_END_HOUR: u32 = 17;

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestConfig {
    /// Root of the Calendar API, e.g. `https://www.googleapis.com/calendar/v3`.
    pub api_base: Url,
    /// Reference timezone for date ranges and working hours.
    pub time_zone: Tz,
    pub work_start_hour: u32,
    pub work_end_hour: u32,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            time_zone: DEFAULT_TIME_ZONE,
            work_start_hour: DEFAULT_WORK_START_HOUR,
            work_end_hour: DEFAULT_WORK_END_HOUR,
        }
    }
}

impl SuggestConfig {
    /// Load from the process environment after reading `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_API_BASE) {
            config.api_base = Url::parse(raw.trim()).map_err(|e| {
                SuggestError::Config(format!("{} is not a valid URL ({}): {}", ENV_API_BASE, raw, e))
            })?;
        }
        if let Some(raw) = lookup(ENV_TIME_ZONE) {
            config.time_zone = parse_time_zone(&raw)?;
        }
        if let Some(raw) = lookup(ENV_WORK_START_HOUR) {
            config.work_start_hour = parse_hour(ENV_WORK_START_HOUR, &raw)?;
        }
        if let Some(raw) = lookup(ENV_WORK_END_HOUR) {
            config.work_end_hour = parse_hour(ENV_WORK_END_HOUR, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `SuggestError::Config` if the working hours are not `start < end <= 24`.
    pub fn validate(&self) -> Result<()> {
        if self.work_end_hour > 24 || self.work_start_hour >= self.work_end_hour {
            return Err(SuggestError::Config(format!(
                "working hours {}-{} must satisfy start < end <= 24",
                self.work_start_hour, self.work_end_hour
            )));
        }
        Ok(())
    }

    /// UTC offset of the reference timezone at the given instant.
    pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        self.time_zone
            .offset_from_utc_datetime(&instant.naive_utc())
            .fix()
    }
}

pub fn parse_time_zone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse()
        .map_err(|_| SuggestError::Config(format!("unknown timezone: {}", raw)))
}

fn parse_hour(key: &str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|h| *h <= 24)
        .ok_or_else(|| SuggestError::Config(format!("{} must be an hour 0-24, got {}", key, raw)))
}

fn default_api_base() -> Url {
    Url::parse(GOOGLE_CALENDAR_API_BASE).expect("default API base URL is valid")
}
