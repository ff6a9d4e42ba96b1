//! # slot-engine
//!
//! Busy-interval merging and working-hours slot search for meeting scheduling.
//!
//! Busy intervals pooled from every attendee are merged into a sorted,
//! non-overlapping set, which is then walked day by day inside a fixed working
//! window to propose meeting start times. Everything here is pure and
//! synchronous; fetching busy data and formatting results happen elsewhere.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use slot_engine::{find_slots, merge, BusyInterval, WorkingWindow};
//!
//! let busy = merge(vec![BusyInterval::new(
//!     Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
//! )]);
//! let window = WorkingWindow::utc(9, 17).unwrap();
//! let slots = find_slots(
//!     &busy,
//!     Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap(),
//!     30,
//!     &window,
//! )
//! .unwrap();
//! assert_eq!(slots[0].start, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`interval`]: `BusyInterval` value type
//! - [`merge`]: Collapse overlapping intervals into a `MergedBusySet`
//! - [`window`]: Daily working-hour window in a fixed offset
//! - [`slots`]: Candidate start times inside working hours
//! - [`error`]: Error types

pub mod error;
pub mod interval;
pub mod merge;
pub mod slots;
pub mod window;

pub use error::SlotError;
pub use interval::BusyInterval;
pub use merge::{merge, merge_streams, MergedBusySet};
pub use slots::{find_slots, CandidateSlot};
pub use window::WorkingWindow;
