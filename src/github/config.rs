use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Retry and throttling parameters for search requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts per logical request
    pub max_retries: u32,

    /// Wait after a 403 that reports an exhausted rate limit
    pub rate_limit_cooldown: Duration,

    /// Wait after a timeout, connection error or unexpected status
    pub retry_cooldown: Duration,

    /// Remaining quota below which we wait for the reset before continuing
    pub low_water_mark: u32,

    /// Extra wait added on top of the reported reset time
    pub reset_margin: Duration,
}

impl RetryPolicy {
    /// Policy with every wait set to zero, for tests and dry runs
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            rate_limit_cooldown: Duration::ZERO,
            retry_cooldown: Duration::ZERO,
            low_water_mark: 5,
            reset_margin: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            rate_limit_cooldown: Duration::from_secs(60),
            retry_cooldown: Duration::from_secs(5),
            low_water_mark: 5,
            reset_margin: Duration::from_secs(1),
        }
    }
}

/// GitHub search configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Optional personal access token sent as a bearer token
    pub token: Option<String>,

    /// API root, overridable so tests can point at a local server
    pub api_base_url: String,

    /// Value of the X-GitHub-Api-Version header
    pub api_version: String,

    pub user_agent: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    pub retry: RetryPolicy,
}

impl GitHubConfig {
    /// Config pointing at an arbitrary base URL with zero cooldowns
    pub fn for_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            retry: RetryPolicy::immediate(3),
            ..Self::default()
        }
    }

    /// Full URL of the repository search endpoint
    pub fn search_url(&self) -> String {
        format!(
            "{}/search/repositories",
            self.api_base_url.trim_end_matches('/')
        )
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: format!("devradar/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_trims_trailing_slash() {
        let config = GitHubConfig::for_base_url("http://127.0.0.1:1234/");
        assert_eq!(
            config.search_url(),
            "http://127.0.0.1:1234/search/repositories"
        );
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.rate_limit_cooldown, Duration::from_secs(60));
        assert_eq!(policy.retry_cooldown, Duration::from_secs(5));
        assert_eq!(policy.low_water_mark, 5);
    }
}
