//! Time utilities for timezone resolution and broadcast-week anchoring

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

/// Resolve a configured timezone string to a fixed UTC offset
///
/// Accepts either an IANA name (e.g. `Europe/Istanbul`, resolved at the
/// current instant) or an explicit offset like `+03:00` / `-0530`. Channel
/// sites report wall-clock times in a single fixed offset per run, so the
/// resolved offset is applied uniformly.
pub fn resolve_timezone(tz_str: &str) -> Result<FixedOffset, String> {
    let tz_str = tz_str.trim();

    if let Ok(tz) = tz_str.parse::<Tz>() {
        return Ok(Utc::now().with_timezone(&tz).offset().fix());
    }

    parse_fixed_offset(tz_str).map_err(|e| {
        format!(
            "Invalid timezone '{tz_str}': {e}. Use a named timezone (e.g. 'Europe/Istanbul') or a UTC offset (e.g. '+03:00')"
        )
    })
}

/// Parse fixed offset timezone formats like "+01:00", "+0100", "-0530"
pub fn parse_fixed_offset(offset_str: &str) -> Result<FixedOffset, String> {
    let offset_str = offset_str.trim();

    let re = Regex::new(r"^([+-])(\d{2}):?(\d{2})$").map_err(|e| format!("Regex error: {e}"))?;

    let caps = re
        .captures(offset_str)
        .ok_or_else(|| format!("Invalid offset format: '{offset_str}'"))?;

    let sign = if &caps[1] == "-" { -1 } else { 1 };
    let hours: i32 = caps[2]
        .parse()
        .map_err(|e| format!("Invalid hours in offset: {e}"))?;
    let minutes: i32 = caps[3]
        .parse()
        .map_err(|e| format!("Invalid minutes in offset: {e}"))?;

    if hours > 23 {
        return Err(format!("Hour offset too large: {hours}h"));
    }
    if minutes > 59 {
        return Err(format!("Minute offset too large: {minutes}m"));
    }

    let total_seconds = sign * (hours * 3600 + minutes * 60);
    FixedOffset::east_opt(total_seconds)
        .ok_or_else(|| format!("Offset out of range: '{offset_str}'"))
}

/// Most recent Monday at local midnight in the given offset
///
/// Several channel sites publish their schedule as a Monday-through-Sunday
/// week with no absolute dates; this is the anchor day for those sources and
/// for fresh rollover detectors.
pub fn monday_midnight(offset: FixedOffset) -> DateTime<FixedOffset> {
    let now = Utc::now().with_timezone(&offset);
    let monday = now - Duration::days(now.weekday().num_days_from_monday() as i64);
    at_local_time(monday, 0, 0)
}

/// Same calendar day as `day`, with the time-of-day replaced by `(hour, minute, 0)`
///
/// Callers must pass an in-range hour/minute; out-of-range values are a bug
/// on the calling side and are rejected upstream.
pub fn at_local_time(day: DateTime<FixedOffset>, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).expect("hour/minute validated by caller");
    let naive = day.date_naive().and_time(time);
    day.timezone()
        .from_local_datetime(&naive)
        .single()
        .expect("fixed offsets map local times unambiguously")
}
