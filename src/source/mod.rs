//! Feature payload sources.
//!
//! A [`DataSource`] fetches the raw bytes the layer later ingests. The
//! real implementation is [`HttpSource`]; this abstraction allows for
//! dependency injection and easier testing by enabling mock sources.

use std::future::Future;

use thiserror::Error;

mod http;

pub use http::HttpSource;

/// Errors from fetching a feature payload.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),
    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
}

/// Trait for asynchronous payload fetching.
pub trait DataSource: Send + Sync {
    /// Fetch the raw payload bytes.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn fetch_raw(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, SourceError>> + Send;
}
