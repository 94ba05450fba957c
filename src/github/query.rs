//! Repository search query construction.
//!
//! GitHub's search syntax is a space-separated list of qualifiers such as
//! `language:rust created:>2024-01-01 stars:>10`. [`SearchExpression`] builds
//! that string and [`SearchQuery`] pairs it with sort and paging parameters.

use crate::error::{Error, Result};
use chrono::{Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Field the search API sorts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Stars,
    Updated,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Named creation window for single-strategy trending lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Timeframe {
    Day,
    Week,
    Month,
    Year,
}

impl Timeframe {
    pub fn days(&self) -> i64 {
        match self {
            Timeframe::Day => 1,
            Timeframe::Week => 7,
            Timeframe::Month => 30,
            Timeframe::Year => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Day => "day",
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Year => "year",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Timeframe::Day),
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            other => Err(Error::Validation(format!(
                "Unknown timeframe '{other}' (expected day, week, month or year)"
            ))),
        }
    }
}

/// Builder for the `q` search parameter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchExpression {
    language: String,
    created_after: Option<NaiveDate>,
    pushed_after: Option<NaiveDate>,
    min_stars: Option<u64>,
}

impl SearchExpression {
    pub fn language(language: &str) -> Self {
        Self {
            language: language.trim().to_string(),
            ..Default::default()
        }
    }

    /// Only repositories created strictly after `date`
    pub fn created_after(mut self, date: NaiveDate) -> Self {
        self.created_after = Some(date);
        self
    }

    /// Only repositories pushed to strictly after `date`
    pub fn pushed_after(mut self, date: NaiveDate) -> Self {
        self.pushed_after = Some(date);
        self
    }

    /// Only repositories with strictly more than `stars` stars
    pub fn stars_above(mut self, stars: u64) -> Self {
        self.min_stars = Some(stars);
        self
    }

    pub fn build(&self) -> String {
        let mut parts = Vec::with_capacity(4);

        if self.language.contains(' ') {
            parts.push(format!("language:\"{}\"", self.language));
        } else {
            parts.push(format!("language:{}", self.language));
        }

        if let Some(date) = self.created_after {
            parts.push(format!("created:>{}", date.format("%Y-%m-%d")));
        }
        if let Some(date) = self.pushed_after {
            parts.push(format!("pushed:>{}", date.format("%Y-%m-%d")));
        }
        if let Some(stars) = self.min_stars {
            parts.push(format!("stars:>{stars}"));
        }

        parts.join(" ")
    }
}

impl fmt::Display for SearchExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

/// One repository search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub expression: SearchExpression,
    pub sort: SortKey,
    pub order: SortOrder,
    pub per_page: usize,
}

impl SearchQuery {
    pub fn new(expression: SearchExpression, sort: SortKey, per_page: usize) -> Self {
        Self {
            expression,
            sort,
            order: SortOrder::Desc,
            per_page,
        }
    }

    /// Query parameters in the order GitHub documents them
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.expression.build()),
            ("sort", self.sort.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

/// Calendar date `days` before `today`
pub fn days_before(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days)
}
