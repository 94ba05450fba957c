use crate::error::{Error, Result};
use crate::github::config::{GitHubConfig, RetryPolicy, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION};
use crate::utils::validation::{validate_api_url, validate_language, validate_limit};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Settings {
    pub github: GitHubConfig,
    pub trending: TrendingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingConfig {
    /// Language used when the CLI does not name one
    pub language: String,
    pub limit: usize,
    /// Seconds between fetches in watch mode
    pub watch_interval_seconds: u64,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            language: "python".to_string(),
            limit: 5,
            watch_interval_seconds: 3600,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: &str) -> Result<T> {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {key} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let api_base_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let api_version =
            std::env::var("GITHUB_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        let request_timeout: u64 = env_or("GITHUB_REQUEST_TIMEOUT", "30")?;
        let max_retries = env_or("GITHUB_MAX_RETRIES", "3")?;
        let rate_limit_cooldown: u64 = env_or("GITHUB_RATE_LIMIT_COOLDOWN", "60")?;
        let retry_cooldown: u64 = env_or("GITHUB_RETRY_COOLDOWN", "5")?;
        let low_water_mark = env_or("GITHUB_RATE_LIMIT_LOW_WATER", "5")?;
        let reset_margin: u64 = env_or("GITHUB_RATE_LIMIT_MARGIN", "1")?;

        let language = std::env::var("DEVRADAR_LANGUAGE").unwrap_or_else(|_| "python".to_string());
        let limit = env_or("DEVRADAR_LIMIT", "5")?;
        let watch_interval_seconds = env_or("DEVRADAR_WATCH_INTERVAL", "3600")?;

        Ok(Settings {
            github: GitHubConfig {
                token,
                api_base_url,
                api_version,
                request_timeout: Duration::from_secs(request_timeout),
                retry: RetryPolicy {
                    max_retries,
                    rate_limit_cooldown: Duration::from_secs(rate_limit_cooldown),
                    retry_cooldown: Duration::from_secs(retry_cooldown),
                    low_water_mark,
                    reset_margin: Duration::from_secs(reset_margin),
                },
                ..GitHubConfig::default()
            },
            trending: TrendingConfig {
                language,
                limit,
                watch_interval_seconds,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.github.retry.max_retries == 0 {
            return Err(Error::Config("GITHUB_MAX_RETRIES must be non-zero".to_string()));
        }

        if self.github.request_timeout.is_zero() {
            return Err(Error::Config(
                "GITHUB_REQUEST_TIMEOUT must be non-zero".to_string(),
            ));
        }

        if self.trending.watch_interval_seconds == 0 {
            return Err(Error::Config(
                "DEVRADAR_WATCH_INTERVAL must be non-zero".to_string(),
            ));
        }

        validate_api_url(&self.github.api_base_url)?;
        validate_language(&self.trending.language)?;
        validate_limit(self.trending.limit)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_settings() -> Settings {
        Settings {
            github: GitHubConfig::default(),
            trending: TrendingConfig::default(),
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = base_settings();
        assert!(settings.validate().is_ok());

        settings.github.retry.max_retries = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut settings = base_settings();
        settings.github.api_base_url = "file:///etc/passwd".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_defaults_for_trending() {
        let mut settings = base_settings();
        settings.trending.limit = 0;
        assert!(settings.validate().is_err());

        let mut settings = base_settings();
        settings.trending.language = "rust stars:>1".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_env_or_default_and_error() {
        let value: u64 = env_or("DEVRADAR_TEST_UNSET_KEY", "42").unwrap();
        assert_eq!(value, 42);

        let err = env_or::<u64>("DEVRADAR_TEST_UNSET_KEY", "abc").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
