//! Schedule source factory
//!
//! Maps configured channel slugs to concrete handlers. New channels are
//! added here and nowhere else; the collector only sees the
//! [`ScheduleSource`] trait.

use std::sync::Arc;
use std::time::Duration;

use crate::config::CollectionConfig;
use crate::errors::{AppError, AppResult};
use crate::sources::dost_tv::DostTvScheduleSource;
use crate::sources::ekol_tv::EkolTvScheduleSource;
use crate::sources::star_tv::StarTvScheduleSource;
use crate::sources::traits::ScheduleSource;
use crate::sources::trt::TrtScheduleSource;
use crate::utils::HttpClient;

/// Factory for creating schedule source handlers
pub struct ScheduleSourceFactory;

impl ScheduleSourceFactory {
    /// Create the handler registered under `slug`
    pub fn create(
        slug: &str,
        settings: &CollectionConfig,
    ) -> AppResult<Arc<dyn ScheduleSource>> {
        let timezone = settings.timezone_offset()?;
        let client =
            HttpClient::with_connect_timeout(Duration::from_secs(settings.connect_timeout_secs));

        match slug {
            "trt1" => Ok(Arc::new(TrtScheduleSource::new(client, timezone))),
            "ekol-tv" => Ok(Arc::new(EkolTvScheduleSource::new(client, timezone))),
            "dost-tv" => Ok(Arc::new(DostTvScheduleSource::new(
                client,
                timezone,
                settings.days_ahead,
            ))),
            "star-tv" => Ok(Arc::new(StarTvScheduleSource::new(client))),
            other => Err(AppError::configuration(format!(
                "Unknown channel slug '{}'. Supported channels: {}",
                other,
                Self::supported_slugs().join(", ")
            ))),
        }
    }

    /// Create handlers for every channel enabled in the configuration
    pub fn create_enabled(settings: &CollectionConfig) -> AppResult<Vec<Arc<dyn ScheduleSource>>> {
        settings
            .channels
            .iter()
            .map(|slug| Self::create(slug, settings))
            .collect()
    }

    /// All slugs with a registered handler
    pub fn supported_slugs() -> Vec<&'static str> {
        vec!["trt1", "ekol-tv", "dost-tv", "star-tv"]
    }

    /// Check whether a slug has a registered handler
    pub fn is_supported(slug: &str) -> bool {
        Self::supported_slugs().contains(&slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_every_supported_slug() {
        let settings = CollectionConfig::default();
        for slug in ScheduleSourceFactory::supported_slugs() {
            let source = ScheduleSourceFactory::create(slug, &settings).unwrap();
            assert!(!source.channel_name().is_empty());
        }
    }

    #[test]
    fn unknown_slug_is_a_configuration_error() {
        let settings = CollectionConfig::default();
        // Arc<dyn ScheduleSource> is not Debug, so no unwrap_err here
        let Err(err) = ScheduleSourceFactory::create("kanal-yok", &settings) else {
            panic!("unknown slug must not produce a handler");
        };
        let message = err.to_string();
        assert!(message.contains("kanal-yok"));
        assert!(message.contains("trt1"), "should list supported slugs");
    }

    #[test]
    fn default_config_channels_are_all_supported() {
        let settings = CollectionConfig::default();
        for slug in &settings.channels {
            assert!(ScheduleSourceFactory::is_supported(slug), "{slug}");
        }
    }
}
