//! Fetcher module for acquiring remote inputs.
//!
//! This module provides the `Fetcher` trait and an HTTP implementation
//! that streams a remote resource into the job workspace. The payload
//! is written incrementally as bytes arrive; it is never buffered in
//! memory.

mod config;
mod error;
mod http;
mod traits;

pub use config::FetcherConfig;
pub use error::FetchError;
pub use http::HttpFetcher;
pub use traits::{FetchedFile, Fetcher};
