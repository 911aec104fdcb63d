//! Star TV schedule source
//!
//! The only implemented source with a proper JSON API. The API exposes both
//! `startTime` and `endTime` per program, so entries arrive with
//! authoritative finish times and the resolver leaves them untouched.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::debug;

use crate::errors::{SourceError, SourceResult};
use crate::models::ScheduleEntry;
use crate::sources::traits::ScheduleSource;
use crate::utils::HttpClient;

const SOURCE_URL: &str = "https://www.startv.com.tr/api/schedule";
const CHANNEL_NAME: &str = "STAR TV";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StarTvProgram {
    start_time: String,
    end_time: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<StarTvContent>,
}

#[derive(Debug, Deserialize)]
struct StarTvContent {
    #[serde(default)]
    plain_summary: Option<String>,
}

/// Handler for the Star TV schedule API
pub struct StarTvScheduleSource {
    http_client: HttpClient,
}

impl StarTvScheduleSource {
    pub fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    fn convert(&self, programs: Vec<StarTvProgram>) -> SourceResult<Vec<ScheduleEntry>> {
        let mut entries = Vec::with_capacity(programs.len());

        for program in programs {
            let start = parse_time(&program.start_time)?;
            let finish = parse_time(&program.end_time)?;

            // The API leaves `description` blank and hides the text in the
            // content summary for most programs
            let description = program
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .or_else(|| program.content.and_then(|c| c.plain_summary));

            entries.push(
                ScheduleEntry::new(start, CHANNEL_NAME, program.title)
                    .with_finish(finish)
                    .with_description(description.as_deref()),
            );
        }

        debug!("Parsed {} programs from {}", entries.len(), CHANNEL_NAME);
        Ok(entries)
    }
}

fn parse_time(value: &str) -> SourceResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| SourceError::parse(CHANNEL_NAME, format!("bad timestamp '{value}': {e}")))
}

#[async_trait]
impl ScheduleSource for StarTvScheduleSource {
    fn channel_name(&self) -> &str {
        CHANNEL_NAME
    }

    async fn fetch_schedule(&self) -> SourceResult<Vec<ScheduleEntry>> {
        let programs: Vec<StarTvProgram> = self.http_client.fetch_json(SOURCE_URL).await?;
        self.convert(programs)
    }
}
