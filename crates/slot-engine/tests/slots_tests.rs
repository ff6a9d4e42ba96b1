//! Tests for working-hours slot search.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use slot_engine::{find_slots, merge, BusyInterval, SlotError, WorkingWindow};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn busy(start: &str, end: &str) -> BusyInterval {
    BusyInterval::new(at(start), at(end))
}

fn nine_to_five() -> WorkingWindow {
    WorkingWindow::utc(9, 17).unwrap()
}

// ── Reference scenarios ─────────────────────────────────────────────────────

#[test]
fn first_candidate_follows_morning_meeting() {
    let merged = merge(vec![busy("2024-01-01T09:00:00Z", "2024-01-01T10:00:00Z")]);

    let slots = find_slots(
        &merged,
        at("2024-01-01T09:00:00Z"),
        at("2024-01-01T18:00:00Z"),
        30,
        &nine_to_five(),
    )
    .unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, at("2024-01-01T10:00:00Z"));
    assert_eq!(slots[0].free_until, at("2024-01-01T17:00:00Z"));
    assert_eq!(slots[0].free_minutes(), 420);
}

#[test]
fn empty_day_yields_one_candidate_at_window_start() {
    let slots = find_slots(
        &merge(Vec::new()),
        at("2024-01-01T00:00:00Z"),
        at("2024-01-01T23:59:59Z"),
        30,
        &nine_to_five(),
    )
    .unwrap();

    assert_eq!(slots.len(), 1, "one gap means one candidate");
    assert_eq!(slots[0].start, at("2024-01-01T09:00:00Z"));
}

#[test]
fn duration_longer_than_window_yields_nothing() {
    // 8 hour window, 9 hour meeting, three days.
    let slots = find_slots(
        &merge(Vec::new()),
        at("2024-01-01T00:00:00Z"),
        at("2024-01-03T23:59:59Z"),
        9 * 60,
        &nine_to_five(),
    )
    .unwrap();

    assert!(slots.is_empty());
}

#[test]
fn duration_equal_to_gap_is_accepted() {
    // Busy 09:30-17:00 leaves exactly 30 minutes at 09:00.
    let merged = merge(vec![busy("2024-01-01T09:30:00Z", "2024-01-01T17:00:00Z")]);

    let slots = find_slots(
        &merged,
        at("2024-01-01T09:00:00Z"),
        at("2024-01-01T17:00:00Z"),
        30,
        &nine_to_five(),
    )
    .unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, at("2024-01-01T09:00:00Z"));
    assert_eq!(slots[0].free_until, at("2024-01-01T09:30:00Z"));
}

#[test]
fn one_candidate_per_gap_across_a_day() {
    // Free: 09:00-10:00, 11:00-13:00, 14:00-15:30, 16:30-17:00
    let merged = merge(vec![
        busy("2024-01-01T10:00:00Z", "2024-01-01T11:00:00Z"),
        busy("2024-01-01T13:00:00Z", "2024-01-01T14:00:00Z"),
        busy("2024-01-01T15:30:00Z", "2024-01-01T16:30:00Z"),
    ]);

    let slots = find_slots(
        &merged,
        at("2024-01-01T00:00:00Z"),
        at("2024-01-01T23:00:00Z"),
        60,
        &nine_to_five(),
    )
    .unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![
            at("2024-01-01T09:00:00Z"),
            at("2024-01-01T11:00:00Z"),
            at("2024-01-01T14:00:00Z"),
        ],
        "the 30 minute gap at 16:30 is too short for an hour"
    );
}

#[test]
fn range_spanning_several_days_rolls_over() {
    let merged = merge(vec![busy("2024-01-02T09:00:00Z", "2024-01-02T17:00:00Z")]);

    let slots = find_slots(
        &merged,
        at("2024-01-01T00:00:00Z"),
        at("2024-01-03T23:59:59Z"),
        30,
        &nine_to_five(),
    )
    .unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![at("2024-01-01T09:00:00Z"), at("2024-01-03T09:00:00Z")],
        "the fully booked 2nd has no candidate"
    );
}

#[test]
fn range_starting_mid_day_starts_at_cursor() {
    let slots = find_slots(
        &merge(Vec::new()),
        at("2024-01-01T13:15:00Z"),
        at("2024-01-01T23:00:00Z"),
        30,
        &nine_to_five(),
    )
    .unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, at("2024-01-01T13:15:00Z"));
}

#[test]
fn range_starting_after_hours_moves_to_next_day() {
    let slots = find_slots(
        &merge(Vec::new()),
        at("2024-01-01T18:00:00Z"),
        at("2024-01-02T23:00:00Z"),
        30,
        &nine_to_five(),
    )
    .unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, at("2024-01-02T09:00:00Z"));
}

#[test]
fn busy_interval_ending_next_morning_does_not_skip_a_day() {
    // Busy from 16:00 on the 1st until 03:00 on the 2nd.
    let merged = merge(vec![busy("2024-01-01T16:00:00Z", "2024-01-02T03:00:00Z")]);

    let slots = find_slots(
        &merged,
        at("2024-01-01T09:00:00Z"),
        at("2024-01-02T23:00:00Z"),
        30,
        &nine_to_five(),
    )
    .unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![at("2024-01-01T09:00:00Z"), at("2024-01-02T09:00:00Z")]
    );
}

#[test]
fn busy_interval_ending_mid_next_day_does_not_rewind() {
    // Busy from 16:00 on the 1st until 11:00 on the 2nd.
    let merged = merge(vec![busy("2024-01-01T16:00:00Z", "2024-01-02T11:00:00Z")]);

    let slots = find_slots(
        &merged,
        at("2024-01-01T09:00:00Z"),
        at("2024-01-02T23:00:00Z"),
        30,
        &nine_to_five(),
    )
    .unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![at("2024-01-01T09:00:00Z"), at("2024-01-02T11:00:00Z")]
    );
}

#[test]
fn window_is_evaluated_in_its_offset() {
    // 09:00 in UTC+9 is 00:00 UTC.
    let jst = FixedOffset::east_opt(9 * 3600).unwrap();
    let window = WorkingWindow::new(9, 17, jst).unwrap();
    let merged = merge(vec![busy("2024-01-01T00:00:00Z", "2024-01-01T02:00:00Z")]);

    let slots = find_slots(
        &merged,
        jst.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().with_timezone(&Utc),
        jst.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap().with_timezone(&Utc),
        30,
        &window,
    )
    .unwrap();

    assert_eq!(slots.len(), 1);
    // 11:00 JST
    assert_eq!(slots[0].start, at("2024-01-01T02:00:00Z"));
    // 17:00 JST
    assert_eq!(slots[0].free_until, at("2024-01-01T08:00:00Z"));
}

#[test]
fn instant_busy_interval_splits_a_gap() {
    let merged = merge(vec![busy("2024-01-01T12:00:00Z", "2024-01-01T12:00:00Z")]);

    let slots = find_slots(
        &merged,
        at("2024-01-01T09:00:00Z"),
        at("2024-01-01T17:00:00Z"),
        60,
        &nine_to_five(),
    )
    .unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![at("2024-01-01T09:00:00Z"), at("2024-01-01T12:00:00Z")]
    );
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn zero_duration_is_rejected() {
    let err = find_slots(
        &merge(Vec::new()),
        at("2024-01-01T09:00:00Z"),
        at("2024-01-01T17:00:00Z"),
        0,
        &nine_to_five(),
    )
    .unwrap_err();
    assert!(matches!(err, SlotError::InvalidArgument(_)));
}

#[test]
fn negative_duration_is_rejected() {
    let result = find_slots(
        &merge(Vec::new()),
        at("2024-01-01T09:00:00Z"),
        at("2024-01-01T17:00:00Z"),
        -15,
        &nine_to_five(),
    );
    assert!(matches!(result, Err(SlotError::InvalidArgument(_))));
}

#[test]
fn inverted_range_is_rejected() {
    let result = find_slots(
        &merge(Vec::new()),
        at("2024-01-02T09:00:00Z"),
        at("2024-01-01T17:00:00Z"),
        30,
        &nine_to_five(),
    );
    assert!(matches!(result, Err(SlotError::InvalidArgument(_))));
}

#[test]
fn empty_range_is_rejected() {
    let result = find_slots(
        &merge(Vec::new()),
        at("2024-01-01T09:00:00Z"),
        at("2024-01-01T09:00:00Z"),
        30,
        &nine_to_five(),
    );
    assert!(matches!(result, Err(SlotError::InvalidArgument(_))));
}

#[test]
fn invalid_working_windows_are_rejected() {
    assert!(WorkingWindow::utc(17, 9).is_err());
    assert!(WorkingWindow::utc(9, 9).is_err());
    assert!(WorkingWindow::utc(0, 25).is_err());
    assert!(WorkingWindow::utc(0, 24).is_ok());
}

#[test]
fn working_window_keeps_its_bounds() {
    let jst = FixedOffset::east_opt(9 * 3600).unwrap();
    let window = WorkingWindow::new(10, 18, jst).unwrap();

    assert_eq!(window.start_hour(), 10);
    assert_eq!(window.end_hour(), 18);
    assert_eq!(window.offset(), jst);
    assert_eq!(window.hours(), 8);
}

#[test]
fn window_ending_at_midnight_covers_late_evening() {
    let window = WorkingWindow::utc(20, 24).unwrap();
    let slots = find_slots(
        &merge(Vec::new()),
        at("2024-01-01T00:00:00Z"),
        at("2024-01-02T23:59:59Z"),
        240,
        &window,
    )
    .unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![at("2024-01-01T20:00:00Z"), at("2024-01-02T20:00:00Z")]
    );
    assert_eq!(slots[0].free_until, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
}
