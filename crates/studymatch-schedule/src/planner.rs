// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Candidate slot enumeration and conflict checks.

use chrono::{Duration, NaiveDateTime, Timelike};

use studymatch_core::CalendarEvent;

/// First slot start of each day.
pub const DAILY_START_HOUR: u32 = 8;

/// Once the cursor passes this hour, enumeration skips to the next day.
pub const DAILY_END_HOUR: u32 = 22;

/// Fixed study slot length.
pub const SLOT_DURATION_HOURS: i64 = 2;

/// Stride between candidate slot starts.
const STRIDE_HOURS: i64 = 1;

/// Slot start hours preferred for study sessions.
const PREFERRED_START_HOURS: [u32; 5] = [14, 15, 16, 19, 20];

/// Suggestion lists are capped at this many entries.
const SUGGESTION_CAP: usize = 10;

/// A fixed-length candidate study window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    /// Human-readable slot identity, e.g. `Jan 15, 2026 08:00 - 10:00`.
    ///
    /// Label equality is the intersection key for common availability, so
    /// this format must stay stable.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %d, %Y %H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// True when `[slot_start, slot_end)` overlaps the event.
fn overlaps(slot_start: NaiveDateTime, slot_end: NaiveDateTime, event: &CalendarEvent) -> bool {
    slot_start < event.end && slot_end > event.start
}

/// True when any blocking event overlaps `[start, end)`.
pub fn has_conflict(events: &[CalendarEvent], start: NaiveDateTime, end: NaiveDateTime) -> bool {
    events
        .iter()
        .filter(|e| e.blocks_matching)
        .any(|e| overlaps(start, end, e))
}

/// Events overlapping the given range, in input order.
pub fn events_in_range(
    events: &[CalendarEvent],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<CalendarEvent> {
    events
        .iter()
        .filter(|e| e.start < end && e.end > start)
        .cloned()
        .collect()
}

/// Enumerate the available 2-hour slots between `range_start` and
/// `range_end`, given the user's booked events.
///
/// The cursor begins at 08:00 on the range's first day and advances one
/// hour at a time; once it is strictly past 22:00 it jumps to 08:00 the
/// next day (so a slot starting exactly at 22:00 is still considered,
/// matching the original planner). A slot is available iff it overlaps no
/// blocking event.
pub fn available_slots(
    events: &[CalendarEvent],
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
) -> Vec<Slot> {
    let mut slots = Vec::new();

    let mut current = day_hour(range_start, DAILY_START_HOUR);
    let mut daily_end = day_hour(range_start, DAILY_END_HOUR);

    while current < range_end {
        if current > daily_end {
            current = day_hour(current + Duration::days(1), DAILY_START_HOUR);
            daily_end = day_hour(current, DAILY_END_HOUR);
            continue;
        }

        let slot_end = current + Duration::hours(SLOT_DURATION_HOURS);
        if !has_conflict(events, current, slot_end) {
            slots.push(Slot {
                start: current,
                end: slot_end,
            });
        }

        current += Duration::hours(STRIDE_HOURS);
    }

    slots
}

/// Labels common to both users' available-slot lists, preserving the
/// first list's generation order.
pub fn common_slot_labels(first: &[Slot], second: &[Slot]) -> Vec<String> {
    let second_labels: std::collections::HashSet<String> =
        second.iter().map(Slot::label).collect();

    first
        .iter()
        .map(Slot::label)
        .filter(|label| second_labels.contains(label))
        .collect()
}

/// Available slots whose start hour is a preferred study hour, capped at
/// ten, preserving generation order.
pub fn suggest_session_times(slots: &[Slot]) -> Vec<String> {
    slots
        .iter()
        .filter(|slot| PREFERRED_START_HOURS.contains(&slot.start.hour()))
        .take(SUGGESTION_CAP)
        .map(Slot::label)
        .collect()
}

/// The given day at `hour`:00:00.
fn day_hour(at: NaiveDateTime, hour: u32) -> NaiveDateTime {
    at.date()
        .and_hms_opt(hour, 0, 0)
        .expect("hour constants are < 24")
}
