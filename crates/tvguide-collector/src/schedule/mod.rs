//! Schedule normalization core
//!
//! The shared logic every channel handler funnels through: inter-program
//! finish-time resolution and the day-rollover heuristic for sources that
//! publish only hours and minutes.

pub mod resolver;
pub mod rollover;

pub use resolver::{TrailingEntryPolicy, end_of_broadcast_day, resolve_finish_times};
pub use rollover::DayRolloverDetector;
