/// Application-level constants
pub const APP_NAME: &str = "anamnesis";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host serving both the HTML listing and its JSON mirror
pub const COMMUNITY_HOST: &str = "https://old.reddit.com";

/// Listing walked by `scrape` (JSON form of the community front page)
pub const LISTING_PATH: &str = "/r/rarediseases/.json";

/// Identifies the crawler to the host. Public data, research use, no login.
pub const USER_AGENT: &str = "Mozilla/5.0 (academic research; public data; anamnesis crawler)";

/// Listing pages walked per crawl unless overridden on the command line
pub const DEFAULT_PAGE_COUNT: usize = 5;

/// Request timeouts. Post pages are heavier than listings.
pub const LISTING_TIMEOUT_SECS: u64 = 30;
pub const POST_TIMEOUT_SECS: u64 = 45;

/// Courtesy pauses between requests so the crawl never hammers the host
pub const POST_PAUSE_SECS: u64 = 6;
pub const PAGE_PAUSE_SECS: u64 = 10;

/// Retry budget for one request: 1 initial attempt + MAX_RETRIES retries,
/// sleeping BACKOFF_BASE_SECS * 2^attempt between attempts (2s, 4s, 8s).
pub const MAX_RETRIES: u32 = 3;
pub const BACKOFF_BASE_SECS: u64 = 2;

/// Statuses worth retrying: rate limiting and transient server errors
pub const RETRYABLE_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// Default artifact names for each pipeline stage
pub const RAW_POSTS_FILE: &str = "reddit_posts.csv";
pub const CLEANED_POSTS_FILE: &str = "reddit_posts_cleaned.csv";
pub const EXPERIENCE_POSTS_FILE: &str = "experience_posts.csv";
pub const ANNOTATED_POSTS_FILE: &str = "experience_posts_extracted.csv";

/// Log filter applied when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "anamnesis=info"
}
