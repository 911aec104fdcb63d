//! tvguide-collector: aggregates TV broadcast schedules from Turkish channel
//! websites into a single semicolon-delimited CSV file.
//!
//! Pipeline: source handlers ([`sources`]) deliver per-channel entry
//! sequences with start times populated; the resolver ([`schedule`]) fills
//! finish times from each successor's start; [`output`] serializes the
//! merged result.

pub mod collector;
pub mod config;
pub mod errors;
pub mod models;
pub mod output;
pub mod schedule;
pub mod sources;
pub mod utils;
