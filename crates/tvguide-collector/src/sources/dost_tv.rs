//! Dost TV schedule source
//!
//! The site renders its guide through a WordPress admin-ajax endpoint: one
//! POST per day (keyed by the day's unix timestamp) returning a JSON
//! envelope with the rendered table as an HTML fragment inside. Each row
//! carries `hh:mm` plus the program title and an optional collapsed
//! description; the requested day provides the date, so no rollover
//! heuristic applies.

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::debug;

use crate::errors::{SourceError, SourceResult};
use crate::models::ScheduleEntry;
use crate::sources::markup::inner_text;
use crate::sources::traits::ScheduleSource;
use crate::utils::HttpClient;
use crate::utils::time::at_local_time;

const SOURCE_URL: &str = "https://dosttv.com/wp-admin/admin-ajax.php";
const CHANNEL_NAME: &str = "Dost TV";

// Pre-encoded shortcode parameters the site's own frontend sends; only the
// trailing date changes between requests.
const FORM_DATA_PREFIX: &str = "action=extvs_get_schedule_simple&param_shortcode=%7B%22style%22%3A%222%22%2C%22fullcontent_in%22%3A%22collapse%22%2C%22show_image%22%3A%22show%22%2C%22channel%22%3A%22Dost+TV%22%2C%22slidesshow%22%3A%22%22%2C%22slidesscroll%22%3A%22%22%2C%22start_on%22%3A%22%22%2C%22before_today%22%3A%22%22%2C%22after_today%22%3A%227%22%2C%22order%22%3A%22DESC%22%2C%22orderby%22%3A%22date%22%2C%22meta_key%22%3A%22%22%2C%22meta_value%22%3A%22%22%2C%22order_channel%22%3A%22yes%22%2C%22class%22%3A%22%22%2C%22ID%22%3A%22ex-8331%22%7D&chanel=Dost+TV&date=";

fn row_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<tr[^>]*>.*?</tr>").expect("static regex"))
}

fn time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<td[^>]*class="[^"]*extvs-table1-time[^"]*"[^>]*>.*?<span[^>]*>\s*(\d{1,2}):(\d{2})"#,
        )
        .expect("static regex")
    })
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<h3[^>]*>(.*?)</h3>").expect("static regex"))
}

fn desc_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<div[^>]*class="[^"]*extvs-collap-ct[^"]*"[^>]*>(.*?)</div>"#)
            .expect("static regex")
    })
}

#[derive(Debug, Deserialize)]
struct ScheduleAjaxResponse {
    html: String,
}

/// Handler for the Dost TV admin-ajax schedule endpoint
pub struct DostTvScheduleSource {
    http_client: HttpClient,
    timezone: FixedOffset,
    days_ahead: u32,
}

impl DostTvScheduleSource {
    pub fn new(http_client: HttpClient, timezone: FixedOffset, days_ahead: u32) -> Self {
        Self {
            http_client,
            timezone,
            days_ahead,
        }
    }

    /// Midnights of the requested window, today first
    fn request_days(&self) -> Vec<DateTime<FixedOffset>> {
        let today = at_local_time(Utc::now().with_timezone(&self.timezone), 0, 0);
        (0..self.days_ahead.max(1) as i64)
            .map(|i| today + Duration::days(i))
            .collect()
    }

    async fn fetch_day(&self, day: DateTime<FixedOffset>) -> SourceResult<Vec<ScheduleEntry>> {
        let body = format!("{FORM_DATA_PREFIX}{}", day.timestamp());
        let headers = [
            ("Accept", "application/json, text/javascript, */*; q=0.01"),
            (
                "Content-Type",
                "application/x-www-form-urlencoded; charset=UTF-8",
            ),
        ];

        let response: ScheduleAjaxResponse = self
            .http_client
            .post_form_json(SOURCE_URL, body, &headers)
            .await?;

        parse_day_fragment(&response.html, day)
    }
}

/// Parse the HTML fragment embedded in one day's JSON response
fn parse_day_fragment(
    html: &str,
    day: DateTime<FixedOffset>,
) -> SourceResult<Vec<ScheduleEntry>> {
    let mut entries = Vec::new();

    for row in row_regex().find_iter(html) {
        let row = row.as_str();

        let Some(time_caps) = time_regex().captures(row) else {
            continue; // header row
        };
        let Some(title_caps) = title_regex().captures(row) else {
            continue;
        };

        let hour: u32 = time_caps[1]
            .parse()
            .map_err(|e| SourceError::parse(CHANNEL_NAME, format!("bad hour: {e}")))?;
        let minute: u32 = time_caps[2]
            .parse()
            .map_err(|e| SourceError::parse(CHANNEL_NAME, format!("bad minute: {e}")))?;
        if hour > 23 || minute > 59 {
            return Err(SourceError::parse(
                CHANNEL_NAME,
                format!("time out of range: {hour:02}:{minute:02}"),
            ));
        }

        let title = inner_text(&title_caps[1]);
        if title.is_empty() {
            continue;
        }

        let description = desc_regex().captures(row).map(|caps| inner_text(&caps[1]));

        entries.push(
            ScheduleEntry::new(at_local_time(day, hour, minute), CHANNEL_NAME, title)
                .with_description(description.as_deref()),
        );
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
impl ScheduleSource for DostTvScheduleSource {
    fn channel_name(&self) -> &str {
        CHANNEL_NAME
    }

    async fn fetch_schedule(&self) -> SourceResult<Vec<ScheduleEntry>> {
        let mut entries = Vec::new();
        // Sequential on purpose: the endpoint throttles bursty clients
        for day in self.request_days() {
            entries.extend(self.fetch_day(day).await?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn day() -> DateTime<FixedOffset> {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        tz.with_ymd_and_hms(2024, 7, 22, 0, 0, 0).unwrap()
    }

    const FRAGMENT: &str = r#"
    <table><tbody>
      <tr>
        <td class="extvs-table1-time"><span>05:00</span></td>
        <td><figure>
          <h3>Kur'an-&#305; Kerim</h3>
          <div class="extvs-collap-ct"><p>Sabah okumas&#305;.</p></div>
        </figure></td>
      </tr>
      <tr>
        <td class="extvs-table1-time"><span>06:30</span></td>
        <td><figure><h3>G&#252;ne Merhaba</h3></figure></td>
      </tr>
    </tbody></table>
    "#;

    #[test]
    fn parses_rows_onto_the_requested_day() {
        let entries = parse_day_fragment(FRAGMENT, day()).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].channel, "Dost TV");
        assert_eq!((entries[0].start.hour(), entries[0].start.minute()), (5, 0));
        assert_eq!(entries[0].start.date_naive().to_string(), "2024-07-22");
        assert!(entries[0].description.is_some());
        assert_eq!(entries[1].description, None);
    }

    #[test]
    fn header_rows_without_time_cells_are_skipped() {
        let html = "<tr><td>Saat</td><td>Program</td></tr>";
        let entries = parse_day_fragment(html, day()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn request_window_starts_today_and_spans_days_ahead() {
        let source = DostTvScheduleSource::new(
            HttpClient::new(),
            FixedOffset::east_opt(3 * 3600).unwrap(),
            3,
        );
        let days = source.request_days();
        assert_eq!(days.len(), 3);
        assert_eq!(days[1] - days[0], Duration::days(1));
        assert_eq!((days[0].hour(), days[0].minute()), (0, 0));
    }
}
