pub mod client;
pub mod listing;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Connection to {0} failed")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

pub use client::{
    fetch_with_retry, is_retryable_error, HttpFetcher, MockFetch, PageFetch, RetryPolicy,
};
pub use listing::{crawl_community, CrawlConfig};
