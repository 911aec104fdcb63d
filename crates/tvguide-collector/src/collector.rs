//! Collection orchestration
//!
//! Fetches all enabled channels concurrently, runs each channel's entries
//! through the resolver with that source's trailing policy, and merges the
//! results for serialization. Channel failures are isolated: a source that
//! errors (or whose data violates the ordering invariant) is logged and
//! contributes zero entries, exactly as if the channel had no programs.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::models::ScheduleEntry;
use crate::schedule::resolve_finish_times;
use crate::sources::ScheduleSource;

/// Fetch, resolve and merge schedules from all given sources
///
/// The merged result is sorted by `(channel, start)` so output is
/// deterministic regardless of which fetch completes first.
pub async fn collect_schedules(sources: &[Arc<dyn ScheduleSource>]) -> Vec<ScheduleEntry> {
    let fetches = sources.iter().map(|source| async move {
        let channel = source.channel_name();

        let mut entries = match source.fetch_schedule().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Channel '{}' failed to fetch: {}", channel, e);
                return Vec::new();
            }
        };

        if let Err(e) = resolve_finish_times(&mut entries, source.trailing_policy()) {
            warn!("Channel '{}' delivered invalid data: {}", channel, e);
            return Vec::new();
        }

        info!("Collected {} programs for channel '{}'", entries.len(), channel);
        entries
    });

    let mut merged: Vec<ScheduleEntry> = join_all(fetches).await.into_iter().flatten().collect();
    merged.sort_by(|a, b| a.channel.cmp(&b.channel).then(a.start.cmp(&b.start)));
    merged
}
