//! Data models for the TV guide collector
//!
//! The central record is [`ScheduleEntry`]: one program occurrence on one
//! channel. Sources construct entries with `finish` absent (unless the site
//! exposes authoritative end times); the resolver in
//! [`crate::schedule::resolver`] fills the gaps before serialization.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One TV program occurrence
///
/// Entries are produced per channel, ordered ascending by `start`. After the
/// resolver has run the record is complete and flows straight to CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Program start, in the source's response timezone
    pub start: DateTime<FixedOffset>,
    /// Program end; `None` until resolved or populated by the source
    pub finish: Option<DateTime<FixedOffset>>,
    /// Channel display name
    pub channel: String,
    /// Program name
    pub title: String,
    /// URL of the channel logo, when the site exposes one
    pub channel_logo_url: Option<String>,
    /// Program description; never `Some` of a blank string
    pub description: Option<String>,
    /// Whether on-demand archive playback is available
    pub has_archive: bool,
}

impl ScheduleEntry {
    /// Create an entry with only the required fields populated
    pub fn new<C, T>(start: DateTime<FixedOffset>, channel: C, title: T) -> Self
    where
        C: Into<String>,
        T: Into<String>,
    {
        Self {
            start,
            finish: None,
            channel: channel.into(),
            title: title.into(),
            channel_logo_url: None,
            description: None,
            has_archive: false,
        }
    }

    /// Attach a description, normalizing blank text to `None`
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        self
    }

    /// Attach a channel logo URL
    pub fn with_logo_url<S: Into<String>>(mut self, url: S) -> Self {
        self.channel_logo_url = Some(url.into());
        self
    }

    /// Set an authoritative finish time known to the source
    pub fn with_finish(mut self, finish: DateTime<FixedOffset>) -> Self {
        self.finish = Some(finish);
        self
    }

    /// Mark archive playback as available
    pub fn with_archive(mut self, has_archive: bool) -> Self {
        self.has_archive = has_archive;
        self
    }
}
