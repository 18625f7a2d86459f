use std::thread;
use std::time::Duration;

use serde::Deserialize;

use crate::config;
use crate::corpus::PostRecord;

use super::client::{fetch_with_retry, is_retryable_error, PageFetch, RetryPolicy};
use super::ScrapeError;

/// Pacing and budget knobs for one crawl. Defaults mirror the constants in
/// `config`.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub pages: usize,
    pub listing_timeout: Duration,
    pub post_timeout: Duration,
    pub post_pause: Duration,
    pub page_pause: Duration,
    pub retry: RetryPolicy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            pages: config::DEFAULT_PAGE_COUNT,
            listing_timeout: Duration::from_secs(config::LISTING_TIMEOUT_SECS),
            post_timeout: Duration::from_secs(config::POST_TIMEOUT_SECS),
            post_pause: Duration::from_secs(config::POST_PAUSE_SECS),
            page_pause: Duration::from_secs(config::PAGE_PAUSE_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

impl CrawlConfig {
    /// No pauses, immediate retries. For tests and local fixtures.
    pub fn unpaced(pages: usize) -> Self {
        CrawlConfig {
            pages,
            post_pause: Duration::ZERO,
            page_pause: Duration::ZERO,
            retry: RetryPolicy::immediate(config::MAX_RETRIES),
            ..CrawlConfig::default()
        }
    }
}

// The JSON mirror of a listing page: a cursor plus the page's posts, each
// wrapped in a kind/data envelope. Unknown fields are plentiful and ignored.

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    after: Option<String>,
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    is_self: bool,
}

fn listing_url(after: Option<&str>) -> String {
    let base = format!("{}{}", config::COMMUNITY_HOST, config::LISTING_PATH);
    match after {
        Some(cursor) => format!("{base}?after={cursor}"),
        None => base,
    }
}

fn sleep_if_set(pause: Duration) {
    if !pause.is_zero() {
        thread::sleep(pause);
    }
}

/// One post's body text via its JSON form. The response is a pair of
/// listings (the post itself, then its comments); only the post body is
/// taken. Link posts never reach this point.
fn fetch_post_body(
    fetch: &dyn PageFetch,
    post_url: &str,
    cfg: &CrawlConfig,
) -> Result<String, ScrapeError> {
    let url = format!("{post_url}.json");
    let body = fetch_with_retry(fetch, &url, cfg.post_timeout, &cfg.retry)?;
    let listings: Vec<Listing> =
        serde_json::from_str(&body).map_err(|e| ScrapeError::ResponseParsing(e.to_string()))?;
    Ok(listings
        .into_iter()
        .next()
        .and_then(|listing| listing.data.children.into_iter().next())
        .map(|thing| thing.data.selftext)
        .unwrap_or_default())
}

/// Walk up to `cfg.pages` listing pages, fetching every self post's body.
/// A post that cannot be fetched is skipped with a warning. A rejected or
/// unreadable listing ends the walk early, keeping what was collected;
/// only an exhausted retry budget aborts the crawl. Posts with empty
/// bodies are kept, the narrative filter judges them downstream.
pub fn crawl_community(
    fetch: &dyn PageFetch,
    cfg: &CrawlConfig,
) -> Result<Vec<PostRecord>, ScrapeError> {
    let mut posts = Vec::new();
    let mut after: Option<String> = None;

    for page in 0..cfg.pages {
        let url = listing_url(after.as_deref());
        tracing::info!(page = page + 1, pages = cfg.pages, "fetching listing page");

        let body = match fetch_with_retry(fetch, &url, cfg.listing_timeout, &cfg.retry) {
            Ok(body) => body,
            Err(e) if !is_retryable_error(&e) => {
                tracing::warn!(url = %url, error = %e, "listing rejected, stopping walk");
                break;
            }
            Err(e) => return Err(e),
        };
        let listing: Listing = match serde_json::from_str(&body) {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "unreadable listing, stopping walk");
                break;
            }
        };

        for thing in listing.data.children {
            let post = thing.data;
            if !post.is_self {
                continue;
            }
            let post_url = format!("{}{}", config::COMMUNITY_HOST, post.permalink);
            let text = match fetch_post_body(fetch, &post_url, cfg) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(url = %post_url, error = %e, "skipping post");
                    continue;
                }
            };
            sleep_if_set(cfg.post_pause);
            posts.push(PostRecord {
                title: post.title,
                url: post_url,
                text,
            });
        }

        after = match listing.data.after {
            Some(cursor) if !cursor.is_empty() => Some(cursor),
            _ => {
                tracing::info!(page = page + 1, "no further pages");
                break;
            }
        };
        if page + 1 < cfg.pages {
            sleep_if_set(cfg.page_pause);
        }
    }

    tracing::info!(posts = posts.len(), "walk finished");
    Ok(posts)
}
