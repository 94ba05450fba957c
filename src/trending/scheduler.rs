use crate::error::Result;
use crate::github::requester::RepositorySearch;
use crate::output::Sink;
use crate::trending::TrendFetcher;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

/// Re-runs the multi-strategy fetch on a fixed interval and delivers each batch
pub struct WatchScheduler<S> {
    fetcher: TrendFetcher<S>,
    language: String,
    limit: usize,
    sink: Sink,
    interval_secs: u64,
}

impl<S: RepositorySearch + 'static> WatchScheduler<S> {
    pub fn new(
        fetcher: TrendFetcher<S>,
        language: String,
        limit: usize,
        sink: Sink,
        interval_secs: u64,
    ) -> Self {
        Self {
            fetcher,
            language,
            limit,
            sink,
            interval_secs,
        }
    }

    /// Start the background loop
    /// The first fetch runs immediately; abort the handle to stop
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Trending watch started for {} (interval: {}s)",
                self.language, self.interval_secs
            );

            let mut ticker = interval(Duration::from_secs(self.interval_secs.max(1)));
            // A fetch that sat out a rate limit reset should not trigger a burst
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once().await {
                    error!("Failed to deliver trending batch: {}", e.log_safe());
                }
            }
        })
    }

    /// One fetch and delivery, returns the number of records delivered
    pub async fn run_once(&self) -> Result<usize> {
        let report = self
            .fetcher
            .fetch_top_trending_report(&self.language, self.limit)
            .await;

        self.sink.deliver(&report.records).await?;

        info!(
            "Delivered {} trending {} repositories{}",
            report.records.len(),
            self.language,
            if report.degraded { " (degraded)" } else { "" }
        );

        Ok(report.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{
        models::RawRepository,
        query::SearchQuery,
        requester::SearchOutcome,
    };
    use crate::trending::TrendRecord;
    use async_trait::async_trait;

    struct OneRepo;

    #[async_trait]
    impl RepositorySearch for OneRepo {
        async fn search(&self, _query: &SearchQuery) -> SearchOutcome {
            SearchOutcome::success(vec![RawRepository {
                full_name: Some("x/a".to_string()),
                stargazers_count: Some(7),
                ..Default::default()
            }])
        }
    }

    #[tokio::test]
    async fn test_run_once_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trending.json");

        let scheduler = WatchScheduler::new(
            TrendFetcher::new(OneRepo),
            "rust".to_string(),
            5,
            Sink::Json(path.clone()),
            60,
        );

        assert_eq!(scheduler.run_once().await.unwrap(), 1);

        let saved: Vec<TrendRecord> =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "x/a");
    }

    #[tokio::test]
    async fn test_start_runs_first_fetch_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trending.json");

        let handle = WatchScheduler::new(
            TrendFetcher::new(OneRepo),
            "rust".to_string(),
            5,
            Sink::Json(path.clone()),
            3600,
        )
        .start();

        for _ in 0..50 {
            if path.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        handle.abort();

        assert!(path.exists());
    }
}
