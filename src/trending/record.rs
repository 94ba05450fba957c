use crate::error::Error;
use crate::github::{models::RawRepository, query::Timeframe};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which strategy first surfaced a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TrendReason {
    NewTrending,
    RecentlyActive,
    Popular,
    Timeframe(Timeframe),
}

impl fmt::Display for TrendReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendReason::NewTrending => f.write_str("new_trending"),
            TrendReason::RecentlyActive => f.write_str("recently_active"),
            TrendReason::Popular => f.write_str("popular"),
            TrendReason::Timeframe(timeframe) => write!(f, "trending_{timeframe}"),
        }
    }
}

impl From<TrendReason> for String {
    fn from(reason: TrendReason) -> Self {
        reason.to_string()
    }
}

impl TryFrom<String> for TrendReason {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "new_trending" => Ok(TrendReason::NewTrending),
            "recently_active" => Ok(TrendReason::RecentlyActive),
            "popular" => Ok(TrendReason::Popular),
            other => match other.strip_prefix("trending_") {
                Some(window) => Ok(TrendReason::Timeframe(window.parse()?)),
                None => Err(Error::Validation(format!("Unknown trend reason '{other}'"))),
            },
        }
    }
}

/// One trending repository, as handed to sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    /// owner/name
    pub name: String,
    pub url: String,
    pub star_count: u64,
    pub description: String,
    pub language: String,
    pub fetched_at: DateTime<Utc>,
    pub trend_reason: TrendReason,
}

impl TrendRecord {
    /// Normalize a search item, `None` when it has no repository name
    pub fn from_raw(
        raw: RawRepository,
        reason: TrendReason,
        fetched_at: DateTime<Utc>,
    ) -> Option<Self> {
        let name = raw.key()?.to_string();

        Some(Self {
            name,
            url: raw.html_url.unwrap_or_default(),
            star_count: raw.stargazers_count.unwrap_or(0).max(0) as u64,
            description: raw.description.unwrap_or_default(),
            language: raw.language.unwrap_or_default(),
            fetched_at,
            trend_reason: reason,
        })
    }
}
