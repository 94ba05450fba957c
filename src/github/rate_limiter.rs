use crate::github::models::RateLimit;
use chrono::Utc;
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Self-throttling based on the quota GitHub reports with every response
///
/// Holds no state between responses: each response carries the current
/// remaining count and reset time, and that alone decides the wait.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    low_water_mark: u32,
    margin: Duration,
}

impl RateLimiter {
    pub fn new(low_water_mark: u32, margin: Duration) -> Self {
        Self {
            low_water_mark,
            margin,
        }
    }

    /// Read the rate limit headers, `None` when no remaining count is present
    pub fn parse_headers(headers: &HeaderMap) -> Option<RateLimit> {
        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok())?;

        let reset = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok());

        Some(RateLimit { remaining, reset })
    }

    /// How long to wait given the reported limit and the current unix time
    pub fn wait_time(&self, limit: &RateLimit, now: i64) -> Option<Duration> {
        if limit.remaining >= self.low_water_mark {
            return None;
        }

        let reset = limit.reset?;
        let secs = (reset - now).max(0) as u64;
        Some(Duration::from_secs(secs) + self.margin)
    }

    /// Sleep until the quota resets if the response left us below the low-water mark
    pub async fn throttle(&self, headers: &HeaderMap) {
        let Some(limit) = Self::parse_headers(headers) else {
            return;
        };

        debug!(
            "Rate limit remaining: {} (resets at {:?})",
            limit.remaining, limit.reset
        );

        if limit.remaining < self.low_water_mark && limit.reset.is_none() {
            warn!(
                "Rate limit low ({} remaining) but no reset time reported, continuing",
                limit.remaining
            );
            return;
        }

        if let Some(wait) = self.wait_time(&limit, Utc::now().timestamp()) {
            warn!(
                "Rate limit approaching ({} remaining), waiting {:?} until reset",
                limit.remaining, wait
            );
            tokio::time::sleep(wait).await;
        }
    }
}
