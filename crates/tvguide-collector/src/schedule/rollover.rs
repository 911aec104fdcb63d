//! Day-rollover detection for hour-only schedule sources
//!
//! Many channel sites list a full day (or week) of programming with nothing
//! but `hh:mm` per row. The only signal that the listing has crossed local
//! midnight is the hour value decreasing between consecutive rows; this
//! module turns that signal into absolute timestamps.
//!
//! Known limitation, deliberately not fixed: two programs that round to the
//! same displayed hour across midnight (e.g. 23:58 then 00:02 shown as the
//! same hour) produce a wrong day. Downstream CSV consumers depend on the
//! current behavior.

use chrono::{DateTime, Duration, FixedOffset};

use crate::errors::{AppError, AppResult};
use crate::utils::time::at_local_time;

/// Tracks the current broadcast day while consuming hour-only rows
///
/// One detector per channel (or per page of a channel): `last_hour` state
/// must never leak across independent listings.
#[derive(Debug, Clone)]
pub struct DayRolloverDetector {
    current_day: DateTime<FixedOffset>,
    last_hour: u32,
    days_advanced: i64,
}

impl DayRolloverDetector {
    /// Create a detector anchored at `anchor_day`
    ///
    /// The anchor is the calendar day the first row belongs to — typically
    /// the most recent Monday at local midnight, or "today" for single-day
    /// listings. Its time-of-day is ignored.
    pub fn new(anchor_day: DateTime<FixedOffset>) -> Self {
        Self {
            current_day: anchor_day,
            last_hour: 0,
            days_advanced: 0,
        }
    }

    /// Compose the timestamp for the next row in broadcast order
    ///
    /// A decreasing hour advances the current day by one; equal or increasing
    /// hours stay on the current day.
    pub fn resolve(&mut self, hour: u32, minute: u32) -> AppResult<DateTime<FixedOffset>> {
        if hour > 23 || minute > 59 {
            return Err(AppError::validation(format!(
                "time of day out of range: {hour:02}:{minute:02}"
            )));
        }

        if hour < self.last_hour {
            self.current_day += Duration::days(1);
            self.days_advanced += 1;
        }
        self.last_hour = hour;

        Ok(at_local_time(self.current_day, hour, minute))
    }

    /// Calendar days added to the anchor so far
    pub fn days_advanced(&self) -> i64 {
        self.days_advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    fn monday() -> DateTime<FixedOffset> {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        // 2024-07-22 is a Monday
        tz.with_ymd_and_hms(2024, 7, 22, 0, 0, 0).unwrap()
    }

    #[test]
    fn hour_decrease_advances_exactly_one_day() {
        let mut detector = DayRolloverDetector::new(monday());
        let hours = [8u32, 10, 14, 23, 2, 7];
        let mut offsets = Vec::new();

        for hour in hours {
            detector.resolve(hour, 0).unwrap();
            offsets.push(detector.days_advanced());
        }

        assert_eq!(offsets, vec![0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn timestamps_carry_the_advanced_day() {
        let mut detector = DayRolloverDetector::new(monday());
        detector.resolve(23, 30).unwrap();
        let after_midnight = detector.resolve(0, 15).unwrap();

        assert_eq!(after_midnight.day(), 23);
        assert_eq!((after_midnight.hour(), after_midnight.minute()), (0, 15));
    }

    #[test]
    fn equal_hours_do_not_advance() {
        let mut detector = DayRolloverDetector::new(monday());
        detector.resolve(9, 0).unwrap();
        detector.resolve(9, 30).unwrap();
        detector.resolve(9, 59).unwrap();
        assert_eq!(detector.days_advanced(), 0);
    }

    #[test]
    fn anchor_time_of_day_is_ignored() {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let late_anchor = tz.with_ymd_and_hms(2024, 7, 22, 21, 45, 9).unwrap();
        let mut detector = DayRolloverDetector::new(late_anchor);
        let first = detector.resolve(6, 0).unwrap();
        assert_eq!((first.hour(), first.minute(), first.second()), (6, 0, 0));
        assert_eq!(first.day(), 22);
    }

    #[test]
    fn rejects_out_of_range_times() {
        let mut detector = DayRolloverDetector::new(monday());
        assert!(detector.resolve(24, 0).is_err());
        assert!(detector.resolve(12, 60).is_err());
    }

    #[test]
    fn fresh_detectors_do_not_share_state() {
        let mut first = DayRolloverDetector::new(monday());
        first.resolve(23, 0).unwrap();

        let mut second = DayRolloverDetector::new(monday());
        second.resolve(6, 0).unwrap();
        assert_eq!(second.days_advanced(), 0);
    }
}
