//! TRT schedule source
//!
//! The TRT 1 site publishes a full week as one page: one
//! `<ul class="event-list">` block per day, each `<li>` carrying a `<time>`
//! tag with an explicit `datetime="dd.mm.YYYY"` date plus an `hh.mm` start
//! time. Explicit dates mean no rollover heuristic is needed here.

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate, TimeZone};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::errors::{SourceError, SourceResult};
use crate::models::ScheduleEntry;
use crate::sources::markup::inner_text;
use crate::sources::traits::ScheduleSource;
use crate::utils::HttpClient;

const SOURCE_URL: &str = "https://www.trt1.com.tr/yayin-akisi";
const CHANNEL_NAME: &str = "TRT 1";

fn item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<li[^>]*>.*?</li>").expect("static regex"))
}

fn time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<time[^>]*datetime="(\d{2}\.\d{2}\.\d{4})"[^>]*>.*?<a[^>]*>\s*(\d{1,2})\.(\d{2})"#,
        )
        .expect("static regex")
    })
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<h2[^>]*class="title"[^>]*>\s*<a[^>]*>(.*?)</a>"#).expect("static regex")
    })
}

fn desc_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<p[^>]*class="desc"[^>]*>\s*<a[^>]*>(.*?)</a>"#).expect("static regex")
    })
}

/// Handler for the TRT 1 weekly schedule page
pub struct TrtScheduleSource {
    http_client: HttpClient,
    timezone: FixedOffset,
}

impl TrtScheduleSource {
    pub fn new(http_client: HttpClient, timezone: FixedOffset) -> Self {
        Self {
            http_client,
            timezone,
        }
    }

    fn parse_html(&self, html: &str) -> SourceResult<Vec<ScheduleEntry>> {
        let mut entries = Vec::new();

        for item in item_regex().find_iter(html) {
            let item = item.as_str();

            // Non-program list items (navigation, day tabs) carry no <time>
            let Some(time_caps) = time_regex().captures(item) else {
                continue;
            };
            let Some(title_caps) = title_regex().captures(item) else {
                continue;
            };

            let start = self.parse_start(&time_caps)?;
            let title = inner_text(&title_caps[1]);
            if title.is_empty() {
                continue;
            }

            let description = desc_regex()
                .captures(item)
                .map(|caps| inner_text(&caps[1]));

            entries.push(
                ScheduleEntry::new(start, CHANNEL_NAME, title)
                    .with_description(description.as_deref()),
            );
        }

        if entries.is_empty() {
            return Err(SourceError::parse(
                CHANNEL_NAME,
                "no program items found; page structure may have changed",
            ));
        }

        debug!("Parsed {} programs from {}", entries.len(), CHANNEL_NAME);
        Ok(entries)
    }

    fn parse_start(
        &self,
        caps: &regex::Captures<'_>,
    ) -> SourceResult<chrono::DateTime<FixedOffset>> {
        let date = NaiveDate::parse_from_str(&caps[1], "%d.%m.%Y")
            .map_err(|e| SourceError::parse(CHANNEL_NAME, format!("bad date '{}': {e}", &caps[1])))?;
        let hour: u32 = caps[2]
            .parse()
            .map_err(|e| SourceError::parse(CHANNEL_NAME, format!("bad hour: {e}")))?;
        let minute: u32 = caps[3]
            .parse()
            .map_err(|e| SourceError::parse(CHANNEL_NAME, format!("bad minute: {e}")))?;

        let naive = date.and_hms_opt(hour, minute, 0).ok_or_else(|| {
            SourceError::parse(
                CHANNEL_NAME,
                format!("time out of range: {hour:02}.{minute:02}"),
            )
        })?;

        self.timezone
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| {
                SourceError::parse(
                    CHANNEL_NAME,
                    format!("invalid start time {} {hour:02}.{minute:02}", &caps[1]),
                )
            })
    }
}

#[async_trait]
impl ScheduleSource for TrtScheduleSource {
    fn channel_name(&self) -> &str {
        CHANNEL_NAME
    }

    async fn fetch_schedule(&self) -> SourceResult<Vec<ScheduleEntry>> {
        let html = self.http_client.fetch_text(SOURCE_URL).await?;
        self.parse_html(&html)
    }
}
