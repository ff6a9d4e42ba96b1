//! # slot-suggest
//!
//! Meeting slot suggestions from calendar free/busy data.
//!
//! A [`Suggester`] takes an explicit [`Session`] (the OAuth access token issued
//! by the identity provider, plus the user's own calendar address), asks a
//! [`CalendarProvider`] for busy intervals of every attendee, and hands them to
//! `slot-engine` for merging and slot search. [`GoogleCalendarClient`] is the
//! provider used in production.
//!
//! ## Modules
//!
//! - [`suggest`]: `Suggester`: list readable calendars, propose slots
//! - [`provider`]: `CalendarProvider` trait and typed provider values
//! - [`google`]: Google Calendar API v3 client
//! - [`session`]: Request-scoped session context
//! - [`config`]: Environment-driven configuration
//! - [`format`]: Display formatting for candidate slots
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod format;
pub mod google;
pub mod provider;
pub mod session;
pub mod suggest;

pub use config::SuggestConfig;
pub use error::SuggestError;
pub use google::GoogleCalendarClient;
pub use provider::{AccessRole, CalendarBusy, CalendarEntry, CalendarProvider, FreeBusyQuery};
pub use session::Session;
pub use suggest::{parse_attendees, SuggestRequest, Suggester, Suggestion};
