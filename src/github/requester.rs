use crate::github::{
    config::GitHubConfig,
    models::{RawRepository, SearchResponse},
    query::SearchQuery,
    rate_limiter::RateLimiter,
};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// How a search request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// 200 with a readable body, possibly with zero items
    Success,
    /// 403 without a rate limit marker
    Forbidden,
    /// 422, the query itself was rejected
    InvalidQuery,
    /// Every attempt failed with a retryable error
    Exhausted,
}

/// Items returned by one logical search request plus how it ended
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub items: Vec<RawRepository>,
    pub status: SearchStatus,
}

impl SearchOutcome {
    pub fn success(items: Vec<RawRepository>) -> Self {
        Self {
            items,
            status: SearchStatus::Success,
        }
    }

    pub fn empty(status: SearchStatus) -> Self {
        Self {
            items: Vec::new(),
            status,
        }
    }

    /// True when the empty-or-not result came from a failure rather than the API
    pub fn is_degraded(&self) -> bool {
        self.status != SearchStatus::Success
    }
}

/// Anything that can run a repository search
///
/// Implementations never fail: every error degrades to an empty outcome.
#[async_trait]
pub trait RepositorySearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> SearchOutcome;
}

enum Attempt {
    Finished(SearchOutcome),
    Retry { cooldown: Duration, reason: String },
}

/// GitHub repository search client with retry and rate limit handling
#[derive(Clone)]
pub struct SearchRequester {
    client: Client,
    config: GitHubConfig,
    rate_limiter: RateLimiter,
}

impl SearchRequester {
    /// Create a new requester
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| Error::Config(format!("Invalid user agent: {e}")))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            header::HeaderValue::from_str(&config.api_version)
                .map_err(|e| Error::Config(format!("Invalid API version: {e}")))?,
        );

        if let Some(token) = &config.token {
            let mut auth_value = header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::Internal(format!("Invalid GitHub token: {e}")))?;
            auth_value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, auth_value);
        } else {
            warn!("GITHUB_TOKEN is not set, searching unauthenticated");
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        let rate_limiter = RateLimiter::new(config.retry.low_water_mark, config.retry.reset_margin);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    /// Run a search and return only the items
    ///
    /// An empty vector means either no matches or a failure; use
    /// [`request_with_status`](Self::request_with_status) to tell them apart.
    pub async fn request(&self, query: &SearchQuery) -> Vec<RawRepository> {
        self.request_with_status(query).await.items
    }

    /// Run a search, retrying transient failures up to `max_retries` attempts
    pub async fn request_with_status(&self, query: &SearchQuery) -> SearchOutcome {
        let url = self.config.search_url();
        let max_attempts = self.config.retry.max_retries.max(1);
        let mut last_reason = String::new();

        for attempt in 1..=max_attempts {
            match self.attempt(&url, query).await {
                Attempt::Finished(outcome) => return outcome,
                Attempt::Retry { cooldown, reason } => {
                    if attempt < max_attempts {
                        warn!(
                            "GitHub search {} (attempt {}/{}). Retrying in {:?}",
                            reason, attempt, max_attempts, cooldown
                        );
                        sleep(cooldown).await;
                    }
                    last_reason = reason;
                }
            }
        }

        error!(
            "GitHub search for '{}' gave up after {} attempts: {}",
            query.expression, max_attempts, last_reason
        );
        SearchOutcome::empty(SearchStatus::Exhausted)
    }

    async fn attempt(&self, url: &str, query: &SearchQuery) -> Attempt {
        debug!("GitHub API request: GET {} q={}", url, query.expression);

        let response = match self.client.get(url).query(&query.params()).send().await {
            Ok(response) => response,
            Err(e) => {
                let reason = if e.is_timeout() {
                    format!("timed out: {e}")
                } else {
                    format!("request failed: {e}")
                };
                return Attempt::Retry {
                    cooldown: self.config.retry.retry_cooldown,
                    reason,
                };
            }
        };

        // Throttle before looking at the status so quota is respected either way
        self.rate_limiter.throttle(response.headers()).await;

        match response.status() {
            StatusCode::OK => match response.json::<SearchResponse>().await {
                Ok(body) => {
                    info!(
                        "GitHub search '{}' returned {} items",
                        query.expression,
                        body.items.len()
                    );
                    Attempt::Finished(SearchOutcome::success(body.items))
                }
                Err(e) => Attempt::Retry {
                    cooldown: self.config.retry.retry_cooldown,
                    reason: format!("returned an unreadable body: {e}"),
                },
            },
            StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                if is_rate_limit_message(&body) {
                    Attempt::Retry {
                        cooldown: self.config.retry.rate_limit_cooldown,
                        reason: "hit the rate limit".to_string(),
                    }
                } else {
                    error!("GitHub search forbidden (403): {}", body.trim());
                    Attempt::Finished(SearchOutcome::empty(SearchStatus::Forbidden))
                }
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let body = response.text().await.unwrap_or_default();
                error!(
                    "GitHub rejected search query '{}' (422): {}",
                    query.expression,
                    body.trim()
                );
                Attempt::Finished(SearchOutcome::empty(SearchStatus::InvalidQuery))
            }
            status => Attempt::Retry {
                cooldown: self.config.retry.retry_cooldown,
                reason: format!("returned HTTP {status}"),
            },
        }
    }
}

#[async_trait]
impl RepositorySearch for SearchRequester {
    async fn search(&self, query: &SearchQuery) -> SearchOutcome {
        self.request_with_status(query).await
    }
}

/// Whether a 403 body is GitHub's primary or secondary rate limit message
pub fn is_rate_limit_message(body: &str) -> bool {
    body.to_lowercase().contains("rate limit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_message_detection() {
        assert!(is_rate_limit_message(
            r#"{"message":"API rate limit exceeded for 1.2.3.4."}"#
        ));
        assert!(is_rate_limit_message(
            "You have exceeded a secondary rate limit. Please wait a few minutes."
        ));
        assert!(!is_rate_limit_message(
            r#"{"message":"Resource not accessible by integration"}"#
        ));
    }

    #[test]
    fn test_requester_creation() {
        let mut config = GitHubConfig::default();
        config.token = Some("ghp_example".to_string());
        assert!(SearchRequester::new(config).is_ok());
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let mut config = GitHubConfig::default();
        config.token = Some("bad\ntoken".to_string());
        assert!(SearchRequester::new(config).is_err());
    }

    #[test]
    fn test_outcome_degraded_flag() {
        assert!(!SearchOutcome::success(Vec::new()).is_degraded());
        assert!(SearchOutcome::empty(SearchStatus::Exhausted).is_degraded());
    }
}
