//! Centralized error handling for the TV guide collector
//!
//! Two layers: `AppError` for everything the binary surfaces to the user
//! (configuration, validation, output I/O), and `SourceError` for failures
//! inside a single channel handler. A failing source never aborts the run;
//! the collector logs it and treats the channel as having no programs.

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for source handler Results
pub type SourceResult<T> = Result<T, SourceError>;
