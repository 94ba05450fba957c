pub mod config;
pub mod models;
pub mod query;
pub mod rate_limiter;
pub mod requester;

pub use config::{GitHubConfig, RetryPolicy};
pub use query::{SearchExpression, SearchQuery, SortKey, SortOrder, Timeframe};
pub use rate_limiter::RateLimiter;
pub use requester::{RepositorySearch, SearchOutcome, SearchRequester, SearchStatus};
