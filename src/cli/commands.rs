use crate::config::Settings;
use crate::github::{query::Timeframe, SearchRequester};
use crate::output::Sink;
use crate::trending::{TrendFetcher, WatchScheduler};
use crate::utils::validation::{validate_language, validate_limit};
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Fill in CLI overrides from settings and validate them
pub fn resolve_target(
    settings: &Settings,
    language: Option<String>,
    limit: Option<usize>,
) -> Result<(String, usize)> {
    let language = validate_language(&language.unwrap_or_else(|| settings.trending.language.clone()))?;
    let limit = validate_limit(limit.unwrap_or(settings.trending.limit))?;
    Ok((language, limit))
}

fn fetcher(settings: &Settings) -> Result<TrendFetcher<SearchRequester>> {
    Ok(TrendFetcher::new(SearchRequester::new(settings.github.clone())?))
}

/// Fetch and deliver the top trending repositories
pub async fn trending(
    settings: &Settings,
    language: Option<String>,
    limit: Option<usize>,
    output: Option<PathBuf>,
) -> Result<()> {
    let (language, limit) = resolve_target(settings, language, limit)?;
    let report = fetcher(settings)?
        .fetch_top_trending_report(&language, limit)
        .await;

    if report.degraded {
        warn!("Some searches failed; results may be incomplete");
    }

    Sink::from_output(output).deliver(&report.records).await
}

/// Fetch and deliver repositories created within a time window
pub async fn timeframe(
    settings: &Settings,
    timeframe: Timeframe,
    language: Option<String>,
    limit: Option<usize>,
    output: Option<PathBuf>,
) -> Result<()> {
    let (language, limit) = resolve_target(settings, language, limit)?;
    let report = fetcher(settings)?
        .fetch_by_timeframe_report(&language, timeframe, limit)
        .await;

    if report.degraded {
        warn!("Search failed; results may be incomplete");
    }

    Sink::from_output(output).deliver(&report.records).await
}

/// Run the watch loop until ctrl-c
pub async fn watch(
    settings: &Settings,
    language: Option<String>,
    limit: Option<usize>,
    interval: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let (language, limit) = resolve_target(settings, language, limit)?;
    let interval = interval.unwrap_or(settings.trending.watch_interval_seconds);
    if interval == 0 {
        return Err(Error::Validation("Interval must be non-zero".to_string()));
    }

    let handle = WatchScheduler::new(
        fetcher(settings)?,
        language,
        limit,
        Sink::from_output(output),
        interval,
    )
    .start();

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::Internal(format!("Failed to listen for ctrl-c: {e}")))?;

    info!("Stopping trending watch");
    handle.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrendingConfig;
    use crate::github::GitHubConfig;

    fn settings() -> Settings {
        Settings {
            github: GitHubConfig::default(),
            trending: TrendingConfig {
                language: "go".to_string(),
                limit: 4,
                watch_interval_seconds: 60,
            },
        }
    }

    #[test]
    fn test_resolve_target_defaults() {
        let (language, limit) = resolve_target(&settings(), None, None).unwrap();
        assert_eq!(language, "go");
        assert_eq!(limit, 4);
    }

    #[test]
    fn test_resolve_target_overrides() {
        let (language, limit) =
            resolve_target(&settings(), Some(" rust ".to_string()), Some(10)).unwrap();
        assert_eq!(language, "rust");
        assert_eq!(limit, 10);
    }

    #[test]
    fn test_resolve_target_rejects_bad_input() {
        assert!(resolve_target(&settings(), Some("rust stars:>5".to_string()), None).is_err());
        assert!(resolve_target(&settings(), None, Some(0)).is_err());
    }
}
