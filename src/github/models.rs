use serde::{Deserialize, Serialize};

/// Rate limit state reported by GitHub response headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub remaining: u32,

    /// Unix timestamp when the quota resets
    pub reset: Option<i64>,
}

/// Repository item from the search API
///
/// Every field is optional on the wire; normalization happens when the
/// item is turned into a `TrendRecord`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRepository {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl RawRepository {
    /// Dedup key, `None` when the item has no usable name
    pub fn key(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Search API response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<RawRepository>,
}
