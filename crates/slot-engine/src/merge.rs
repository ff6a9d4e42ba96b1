//! Collapse busy intervals pooled from several attendees into a minimal set.
//!
//! Intervals are sorted by start time, then swept once from left to right. An
//! interval joins the block being built only when it starts strictly before that
//! block ends, so touching intervals stay separate.

use serde::Serialize;

use crate::interval::BusyInterval;

/// Sorted, pairwise-disjoint busy intervals. Only [`merge`] builds one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MergedBusySet {
    intervals: Vec<BusyInterval>,
}

impl MergedBusySet {
    pub fn as_slice(&self) -> &[BusyInterval] {
        &self.intervals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BusyInterval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

impl<'a> IntoIterator for &'a MergedBusySet {
    type Item = &'a BusyInterval;
    type IntoIter = std::slice::Iter<'a, BusyInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

/// Merge possibly-overlapping busy intervals into a [`MergedBusySet`].
///
/// Empty input gives an empty set. An interval contained in another is absorbed
/// without changing the outer bounds.
pub fn merge<I>(intervals: I) -> MergedBusySet
where
    I: IntoIterator<Item = BusyInterval>,
{
    let mut sorted: Vec<BusyInterval> = intervals
        .into_iter()
        .map(|i| BusyInterval::new(i.start, i.end))
        .collect();

    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged = Vec::with_capacity(sorted.len());
    let mut iter = sorted.into_iter();
    let Some(mut current) = iter.next() else {
        return MergedBusySet::default();
    };

    for next in iter {
        if next.start < current.end {
            if next.end > current.end {
                current = BusyInterval {
                    start: current.start,
                    end: next.end,
                };
            }
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);

    MergedBusySet { intervals: merged }
}

/// Pool one busy list per attendee and merge them in a single pass.
pub fn merge_streams<'a, S>(streams: S) -> MergedBusySet
where
    S: IntoIterator<Item = &'a [BusyInterval]>,
{
    merge(streams.into_iter().flat_map(|s| s.iter().copied()))
}
