//! Source handler trait definitions

use async_trait::async_trait;

use crate::errors::SourceResult;
use crate::models::ScheduleEntry;
use crate::schedule::TrailingEntryPolicy;

/// A site-specific schedule source for one channel
///
/// Implementations deliver an ordered-by-start-time sequence of entries with
/// `start`, `channel` and `title` populated and `finish` absent — unless the
/// site exposes authoritative end times, in which case `finish` may already
/// be set and the resolver leaves it alone.
///
/// Handlers own everything volatile: URLs, markup selectors, pagination.
/// The shared normalization (finish-time resolution, CSV output) lives in
/// [`crate::schedule`] and [`crate::output`].
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Channel display name, as written to the `channel` CSV column
    fn channel_name(&self) -> &str;

    /// How the resolver should treat this channel's trailing entry
    ///
    /// Sources whose listings are cut off mid-day (pagination, partial week
    /// pages) return [`TrailingEntryPolicy::Drop`]; the default keeps the
    /// last entry with the 23:59 fallback.
    fn trailing_policy(&self) -> TrailingEntryPolicy {
        TrailingEntryPolicy::EndOfDayFallback
    }

    /// Fetch and parse the channel's schedule
    ///
    /// Failures are per-channel: the collector logs them and continues with
    /// the other sources.
    async fn fetch_schedule(&self) -> SourceResult<Vec<ScheduleEntry>>;
}
