//! Persisted output formats

pub mod csv;

pub use csv::{CSV_HEADER, render, write_csv};
