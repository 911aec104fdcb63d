//! Shared utilities

pub mod http_client;
pub mod time;

pub use http_client::HttpClient;
