// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Availability planning: derives free study slots from booked calendar
//! events and intersects two users' slot lists.
//!
//! Slot enumeration is deliberately simple and deterministic: 2-hour
//! candidate slots at a 1-hour stride inside a fixed 08:00-22:00 daily
//! window. Common availability between two users is label-set
//! intersection, not interval math; the label IS the slot identity.

pub mod availability;
pub mod planner;

pub use availability::parse_weekly_availability;
pub use planner::{
    DAILY_END_HOUR, DAILY_START_HOUR, SLOT_DURATION_HOURS, Slot, available_slots,
    common_slot_labels, events_in_range, has_conflict, suggest_session_times,
};
