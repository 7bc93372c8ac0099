//! Data capabilities and their adapters.
//!
//! The scoring core only sees the three traits below; the Yahoo Finance and
//! Google News adapters are one way of supplying them.

mod fundamentals;
mod google_news;
mod headlines;
mod resolver;
mod yahoo;

pub use fundamentals::{
    BalanceSheet, CompanyProfile, FundamentalsSnapshot, NewsItem, Officer, CURRENT_ASSETS,
    CURRENT_LIABILITIES, TOTAL_ASSETS, TOTAL_LIABILITIES, TOTAL_LIABILITIES_NET_MINORITY_INTEREST,
};
pub use google_news::GoogleNewsFeed;
pub use headlines::HeadlineCollector;
pub use resolver::TickerResolver;
pub use yahoo::YahooClient;

use crate::error::DataError;

/// A candidate returned by a company search.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerCandidate {
    pub symbol: String,
    pub name: Option<String>,
    pub exchange: Option<String>,
}

/// Free-text company search.
pub trait CompanySearch {
    /// Candidates ordered by the provider's relevance.
    fn search(&self, query: &str) -> Result<Vec<TickerCandidate>, DataError>;
}

/// Ticker to fundamentals lookup.
pub trait FundamentalsSource {
    fn profile(&self, ticker: &str) -> Result<CompanyProfile, DataError>;

    fn balance_sheet(&self, ticker: &str) -> Result<BalanceSheet, DataError>;

    fn news(&self, ticker: &str) -> Result<Vec<NewsItem>, DataError>;

    /// Fetch every part, keeping each part's outcome separate.
    fn snapshot(&self, ticker: &str) -> FundamentalsSnapshot {
        FundamentalsSnapshot {
            ticker: ticker.to_string(),
            profile: self.profile(ticker),
            balance_sheet: self.balance_sheet(ticker),
            news: self.news(ticker),
        }
    }
}

/// An entry of a searched feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: Option<String>,
}

/// Query-driven feed search, returning entries in feed order.
pub trait FeedSearch {
    fn search(&self, query: &str) -> Result<Vec<FeedEntry>, DataError>;
}
