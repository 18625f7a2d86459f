use serde::{Deserialize, Serialize};

/// One collected forum post, in crawl order. Fields absent from a source
/// row deserialize as empty strings; downstream stages treat empty text as
/// "no narrative" rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub text: String,
}
