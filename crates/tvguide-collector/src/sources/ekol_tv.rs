//! Ekol TV schedule source
//!
//! One page per day (`?date=d.m.Y`), Monday through Sunday of the current
//! week, fetched concurrently. Rows carry only `hh:mm`, so each day's page
//! runs through a fresh [`DayRolloverDetector`] anchored at the page's date.
//! The site truncates the final listing of a page mid-day, so the trailing
//! entry is dropped rather than given the end-of-day fallback.

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset};
use futures::future::try_join_all;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::errors::{SourceError, SourceResult};
use crate::models::ScheduleEntry;
use crate::schedule::{DayRolloverDetector, TrailingEntryPolicy};
use crate::sources::markup::inner_text;
use crate::sources::traits::ScheduleSource;
use crate::utils::HttpClient;
use crate::utils::time::monday_midnight;

const SOURCE_URL: &str = "https://www.ekoltv.com.tr/yayin-akisi";
const CHANNEL_NAME: &str = "Ekol TV";

fn row_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<span[^>]*class="time"[^>]*>\s*(\d{1,2}):(\d{2})\s*</span>.*?<a[^>]*class="title"[^>]*>(.*?)</a>"#,
        )
        .expect("static regex")
    })
}

/// Handler for the Ekol TV per-day schedule pages
pub struct EkolTvScheduleSource {
    http_client: HttpClient,
    timezone: FixedOffset,
}

impl EkolTvScheduleSource {
    pub fn new(http_client: HttpClient, timezone: FixedOffset) -> Self {
        Self {
            http_client,
            timezone,
        }
    }

    fn day_urls(&self) -> Vec<(DateTime<FixedOffset>, String)> {
        let monday = monday_midnight(self.timezone);
        (0..7)
            .map(|i| {
                let day = monday + Duration::days(i);
                let url = format!(
                    "{SOURCE_URL}?date={}.{}.{}",
                    day.format("%-d"),
                    day.format("%-m"),
                    day.format("%Y"),
                );
                (day, url)
            })
            .collect()
    }

    async fn fetch_day(
        &self,
        day: DateTime<FixedOffset>,
        url: String,
    ) -> SourceResult<(DateTime<FixedOffset>, Vec<ScheduleEntry>)> {
        let html = self.http_client.fetch_text(&url).await?;
        let entries = parse_day_html(&html, day)?;
        Ok((day, entries))
    }
}

/// Parse one day page, resolving hour-only rows against the page's date
fn parse_day_html(
    html: &str,
    day: DateTime<FixedOffset>,
) -> SourceResult<Vec<ScheduleEntry>> {
    let mut detector = DayRolloverDetector::new(day);
    let mut entries = Vec::new();

    for caps in row_regex().captures_iter(html) {
        let hour: u32 = caps[1]
            .parse()
            .map_err(|e| SourceError::parse(CHANNEL_NAME, format!("bad hour: {e}")))?;
        let minute: u32 = caps[2]
            .parse()
            .map_err(|e| SourceError::parse(CHANNEL_NAME, format!("bad minute: {e}")))?;
        let title = inner_text(&caps[3]);
        if title.is_empty() {
            continue;
        }

        let start = detector
            .resolve(hour, minute)
            .map_err(|e| SourceError::parse(CHANNEL_NAME, e.to_string()))?;

        entries.push(ScheduleEntry::new(start, CHANNEL_NAME, title));
    }

    debug!(
        "Parsed {} programs for {} on {}",
        entries.len(),
        CHANNEL_NAME,
        day.date_naive()
    );
    Ok(entries)
}

#[async_trait]
impl ScheduleSource for EkolTvScheduleSource {
    fn channel_name(&self) -> &str {
        CHANNEL_NAME
    }

    fn trailing_policy(&self) -> TrailingEntryPolicy {
        TrailingEntryPolicy::Drop
    }

    async fn fetch_schedule(&self) -> SourceResult<Vec<ScheduleEntry>> {
        let fetches = self
            .day_urls()
            .into_iter()
            .map(|(day, url)| self.fetch_day(day, url));

        let mut days = try_join_all(fetches).await?;
        // Completion order is arbitrary; the resolver requires start order
        days.sort_by_key(|(day, _)| *day);

        Ok(days.into_iter().flat_map(|(_, entries)| entries).collect())
    }
}
