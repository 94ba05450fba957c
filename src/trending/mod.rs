//! Trending repository discovery.
//!
//! [`TrendFetcher`] combines three search strategies into one ranked list:
//!
//! 1. new and rising: created in the last 30 days, more than 10 stars,
//!    sorted by stars
//! 2. recently active: pushed in the last 7 days, more than 100 stars,
//!    sorted by last update
//! 3. popular: no recency filter, sorted by stars; only runs when the first
//!    two found fewer than `limit` items
//!
//! Results are concatenated in that order and deduplicated by repository
//! name, so an earlier strategy's tag wins. Retries and rate limiting are the
//! requester's job; the fetcher issues each query exactly once.

pub mod merge;
pub mod record;
pub mod scheduler;

pub use merge::merge_unique;
pub use record::{TrendReason, TrendRecord};
pub use scheduler::WatchScheduler;

use crate::github::{
    query::{days_before, SearchExpression, SearchQuery, SortKey, Timeframe},
    requester::{RepositorySearch, SearchOutcome, SearchStatus},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Page size for the new-and-rising and recently-active strategies
pub const STRATEGY_PAGE_SIZE: usize = 3;

const NEW_REPO_WINDOW_DAYS: i64 = 30;
const NEW_REPO_MIN_STARS: u64 = 10;
const ACTIVE_REPO_WINDOW_DAYS: i64 = 7;
const ACTIVE_REPO_MIN_STARS: u64 = 100;

/// Records from one fetch plus whether any strategy failed along the way
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrendReport {
    pub records: Vec<TrendRecord>,

    /// At least one strategy ended in a non-success status, so an empty or
    /// short list may be a failure rather than a quiet day
    pub degraded: bool,
}

/// Strategy A: young repositories gaining stars
pub fn new_and_rising_query(language: &str, today: NaiveDate) -> SearchQuery {
    let expression = SearchExpression::language(language)
        .created_after(days_before(today, NEW_REPO_WINDOW_DAYS))
        .stars_above(NEW_REPO_MIN_STARS);
    SearchQuery::new(expression, SortKey::Stars, STRATEGY_PAGE_SIZE)
}

/// Strategy B: established repositories with recent pushes
pub fn recently_active_query(language: &str, today: NaiveDate) -> SearchQuery {
    let expression = SearchExpression::language(language)
        .pushed_after(days_before(today, ACTIVE_REPO_WINDOW_DAYS))
        .stars_above(ACTIVE_REPO_MIN_STARS);
    SearchQuery::new(expression, SortKey::Updated, STRATEGY_PAGE_SIZE)
}

/// Strategy C: all-time most starred
pub fn popular_query(language: &str, limit: usize) -> SearchQuery {
    SearchQuery::new(SearchExpression::language(language), SortKey::Stars, limit)
}

/// Repositories created within `timeframe`, most starred first
pub fn timeframe_query(
    language: &str,
    timeframe: Timeframe,
    limit: usize,
    today: NaiveDate,
) -> SearchQuery {
    let expression =
        SearchExpression::language(language).created_after(days_before(today, timeframe.days()));
    SearchQuery::new(expression, SortKey::Stars, limit)
}

/// Multi-strategy trending fetcher
pub struct TrendFetcher<S> {
    search: S,
}

impl<S: RepositorySearch> TrendFetcher<S> {
    pub fn new(search: S) -> Self {
        Self { search }
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    /// Top trending repositories for `language`, at most `limit` of them
    ///
    /// An empty list is a valid result: it may mean no matches or that every
    /// strategy failed. See [`fetch_top_trending_report`](Self::fetch_top_trending_report).
    pub async fn fetch_top_trending(&self, language: &str, limit: usize) -> Vec<TrendRecord> {
        self.fetch_top_trending_report(language, limit).await.records
    }

    pub async fn fetch_top_trending_report(&self, language: &str, limit: usize) -> TrendReport {
        if limit == 0 {
            return TrendReport::default();
        }

        let today = Utc::now().date_naive();
        info!("Fetching top {} trending {} repositories", limit, language);

        let rising = self
            .search
            .search(&new_and_rising_query(language, today))
            .await;
        let active = self
            .search
            .search(&recently_active_query(language, today))
            .await;

        let found = rising.items.len() + active.items.len();
        let mut degraded = rising.is_degraded() || active.is_degraded();
        let mut batches = vec![
            (rising.items, TrendReason::NewTrending),
            (active.items, TrendReason::RecentlyActive),
        ];

        if found < limit {
            info!(
                "Only {} candidates from recent strategies, falling back to popularity",
                found
            );
            let popular = self.search.search(&popular_query(language, limit)).await;
            degraded |= popular.is_degraded();
            batches.push((popular.items, TrendReason::Popular));
        }

        let records = format_records(batches, limit);
        log_result(language, &records, degraded);

        TrendReport { records, degraded }
    }

    /// Repositories created within `timeframe`, tagged `trending_<timeframe>`
    pub async fn fetch_by_timeframe(
        &self,
        language: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Vec<TrendRecord> {
        self.fetch_by_timeframe_report(language, timeframe, limit)
            .await
            .records
    }

    pub async fn fetch_by_timeframe_report(
        &self,
        language: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> TrendReport {
        if limit == 0 {
            return TrendReport::default();
        }

        let today = Utc::now().date_naive();
        info!(
            "Fetching {} repositories trending this {}",
            language, timeframe
        );

        let SearchOutcome { items, status } = self
            .search
            .search(&timeframe_query(language, timeframe, limit, today))
            .await;
        let degraded = status != SearchStatus::Success;

        let records = format_records(vec![(items, TrendReason::Timeframe(timeframe))], limit);
        log_result(language, &records, degraded);

        TrendReport { records, degraded }
    }
}

fn format_records(batches: Vec<merge::TaggedBatch>, limit: usize) -> Vec<TrendRecord> {
    let fetched_at = Utc::now();

    merge_unique(batches)
        .into_iter()
        .filter_map(|(raw, reason)| TrendRecord::from_raw(raw, reason, fetched_at))
        .take(limit)
        .collect()
}

fn log_result(language: &str, records: &[TrendRecord], degraded: bool) {
    if degraded {
        warn!(
            "Trending {} fetch returned {} records with at least one failed search",
            language,
            records.len()
        );
    } else {
        info!(
            "Trending {} fetch returned {} records",
            language,
            records.len()
        );
    }
}
