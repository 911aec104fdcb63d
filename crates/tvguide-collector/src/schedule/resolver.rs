//! Finish-time resolution
//!
//! Channel sites publish start times only; a program ends when the next one
//! begins. The resolver fills each missing `finish` from the next entry's
//! `start` and applies a trailing-entry policy for the program with no
//! successor.

use chrono::{DateTime, FixedOffset};

use crate::errors::{AppError, AppResult};
use crate::models::ScheduleEntry;
use crate::utils::time::at_local_time;

/// What to do with the last entry of a channel's sequence
///
/// The resolver has no notion of "incomplete" listings; whether the tail of a
/// schedule is trustworthy is the source's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingEntryPolicy {
    /// Keep the entry and let it run to 23:59 of its own start date
    ///
    /// An explicit approximation: callers must not rely on this being the
    /// true broadcast end.
    #[default]
    EndOfDayFallback,
    /// Discard the entry (the source considers it likely truncated,
    /// e.g. pagination cut off mid-day)
    Drop,
}

/// Fill missing finish times from each successor's start time
///
/// Requirements on input: one channel's entries, already sorted ascending by
/// `start`. The resolver validates ordering and fails fast with a
/// `Validation` error naming the offending entry; it never sorts, never
/// touches `start`, and leaves finishes a source already populated alone.
///
/// Empty input is a successful no-op. A single-entry sequence only receives
/// the trailing-entry treatment.
pub fn resolve_finish_times(
    entries: &mut Vec<ScheduleEntry>,
    policy: TrailingEntryPolicy,
) -> AppResult<()> {
    if entries.is_empty() {
        return Ok(());
    }

    validate_ordering(entries)?;

    for i in 0..entries.len() - 1 {
        let next_start = entries[i + 1].start;
        let entry = &mut entries[i];
        if entry.finish.is_none() {
            entry.finish = Some(next_start);
        }
    }

    match policy {
        TrailingEntryPolicy::Drop => {
            entries.pop();
        }
        TrailingEntryPolicy::EndOfDayFallback => {
            // Index access is safe: the sequence is non-empty here
            let last = entries.len() - 1;
            let entry = &mut entries[last];
            if entry.finish.is_none() {
                entry.finish = Some(end_of_broadcast_day(entry.start));
            }
        }
    }

    Ok(())
}

/// 23:59:00 on the same calendar day and offset as `start`
pub fn end_of_broadcast_day(start: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    at_local_time(start, 23, 59)
}

fn validate_ordering(entries: &[ScheduleEntry]) -> AppResult<()> {
    for (i, pair) in entries.windows(2).enumerate() {
        if pair[1].start < pair[0].start {
            return Err(AppError::validation(format!(
                "entries for channel '{}' are not sorted by start time: '{}' (index {}) starts at {} but follows '{}' starting at {}",
                pair[1].channel,
                pair[1].title,
                i + 1,
                pair[1].start,
                pair[0].title,
                pair[0].start,
            )));
        }
    }

    for (i, entry) in entries.iter().enumerate() {
        if let Some(finish) = entry.finish
            && finish < entry.start
        {
            return Err(AppError::validation(format!(
                "entry '{}' (index {}) on channel '{}' has finish {} earlier than start {}",
                entry.title, i, entry.channel, finish, entry.start,
            )));
        }
    }

    Ok(())
}
