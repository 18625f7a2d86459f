use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::config;

use super::ScrapeError;

/// Minimal HTTP surface the crawl walks through, so tests can drive it
/// with a scripted fetcher instead of a live host.
pub trait PageFetch {
    /// Fetch one URL and return the response body on a 2xx status.
    fn get(&self, url: &str, timeout: Duration) -> Result<String, ScrapeError>;
}

/// Crawler HTTP client. Timeouts are per request: listing and post pages
/// carry different budgets.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config::USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetch for HttpFetcher {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ScrapeError::Connection(url.to_string())
                } else if e.is_timeout() {
                    ScrapeError::Timeout(timeout.as_secs())
                } else {
                    ScrapeError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .map_err(|e| ScrapeError::HttpClient(e.to_string()))
    }
}

/// Retry budget for one request: 1 + `max_retries` attempts, waiting
/// `backoff_base * 2^attempt` between them.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: config::MAX_RETRIES,
            backoff_base: Duration::from_secs(config::BACKOFF_BASE_SECS),
        }
    }
}

impl RetryPolicy {
    /// No waiting between attempts. For tests and local fixtures.
    pub fn immediate(max_retries: u32) -> Self {
        RetryPolicy {
            max_retries,
            backoff_base: Duration::ZERO,
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(attempt)
    }
}

/// Check if a failure is transient: connection drops, timeouts, rate
/// limiting and 5xx responses.
pub fn is_retryable_error(error: &ScrapeError) -> bool {
    match error {
        ScrapeError::Connection(_) | ScrapeError::Timeout(_) => true,
        ScrapeError::HttpStatus { status, .. } => config::RETRYABLE_STATUSES.contains(status),
        _ => false,
    }
}

/// Fetch one URL, retrying transient failures within the policy budget.
/// Non-retryable errors propagate immediately.
pub fn fetch_with_retry(
    fetch: &dyn PageFetch,
    url: &str,
    timeout: Duration,
    policy: &RetryPolicy,
) -> Result<String, ScrapeError> {
    let mut last_error: Option<ScrapeError> = None;

    for attempt in 0..=policy.max_retries {
        match fetch.get(url, timeout) {
            Ok(body) => return Ok(body),
            Err(e) if is_retryable_error(&e) && attempt < policy.max_retries => {
                tracing::warn!(
                    url = %url,
                    attempt = attempt + 1,
                    error = %e,
                    "request failed, retrying"
                );
                let wait = policy.backoff(attempt);
                if !wait.is_zero() {
                    thread::sleep(wait);
                }
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error
        .unwrap_or_else(|| ScrapeError::HttpClient("All retry attempts exhausted".into())))
}

/// Scripted fetcher for tests: serves canned bodies or statuses by URL and
/// records every request in order.
pub struct MockFetch {
    pages: HashMap<String, String>,
    errors: HashMap<String, u16>,
    calls: Mutex<Vec<String>>,
}

impl MockFetch {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            errors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_error(mut self, url: &str, status: u16) -> Self {
        self.errors.insert(url.to_string(), status);
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

impl Default for MockFetch {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetch for MockFetch {
    fn get(&self, url: &str, _timeout: Duration) -> Result<String, ScrapeError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(url.to_string());
        if let Some(status) = self.errors.get(url) {
            return Err(ScrapeError::HttpStatus {
                status: *status,
                url: url.to_string(),
            });
        }
        match self.pages.get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(ScrapeError::HttpClient(format!(
                "no scripted response for {url}"
            ))),
        }
    }
}
