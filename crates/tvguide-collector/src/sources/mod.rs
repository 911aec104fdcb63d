//! Channel source handlers
//!
//! Each Turkish TV site gets one small handler behind the [`ScheduleSource`]
//! trait; the factory composes the enabled set from configuration. Handlers
//! differ only in acquisition (page structure, time encoding, pagination) —
//! normalization is shared:
//!
//! - `trt` — weekly HTML page with explicit dates per item
//! - `ekol_tv` — one hour-only page per day, rollover-resolved
//! - `dost_tv` — admin-ajax JSON envelope per day with embedded HTML
//! - `star_tv` — JSON API with authoritative start and end times

pub mod dost_tv;
pub mod ekol_tv;
pub mod factory;
pub mod markup;
pub mod star_tv;
pub mod traits;
pub mod trt;

pub use factory::ScheduleSourceFactory;
pub use traits::ScheduleSource;
