//! Relevance-filtered headline collection from the news feed and equity news.

use std::collections::HashSet;
use tracing::{debug, warn};

use super::{FeedSearch, FundamentalsSnapshot};

/// Default number of feed entries considered per query.
pub const DEFAULT_FEED_MAX_ENTRIES: usize = 30;

/// Gathers deduplicated headlines that mention the company.
pub struct HeadlineCollector<'a> {
    feed: &'a dyn FeedSearch,
    max_feed_entries: usize,
}

impl<'a> HeadlineCollector<'a> {
    pub fn new(feed: &'a dyn FeedSearch) -> Self {
        Self {
            feed,
            max_feed_entries: DEFAULT_FEED_MAX_ENTRIES,
        }
    }

    pub fn with_max_feed_entries(mut self, max: usize) -> Self {
        self.max_feed_entries = max;
        self
    }

    /// Feed query for a company, with its ticker when listed.
    pub fn feed_query(company: &str, ticker: Option<&str>) -> String {
        match ticker {
            Some(ticker) => format!("\"{}\" OR {} risk investigation", company, ticker),
            None => format!("\"{}\" company risk investigation", company),
        }
    }

    /// Union of both sources, deduplicated by exact title.
    pub fn collect(
        &self,
        company: &str,
        ticker: Option<&str>,
        snapshot: Option<&FundamentalsSnapshot>,
    ) -> HashSet<String> {
        let needle = company.to_lowercase();
        let relevant = |title: &str| title.to_lowercase().contains(&needle);
        let mut headlines = HashSet::new();

        let query = Self::feed_query(company, ticker);
        match self.feed.search(&query) {
            Ok(entries) => {
                let before = headlines.len();
                for entry in entries.into_iter().take(self.max_feed_entries) {
                    if relevant(&entry.title) {
                        headlines.insert(entry.title);
                    }
                }
                debug!("News feed contributed {} headlines", headlines.len() - before);
            }
            Err(e) => warn!("News feed unavailable for '{}': {}", company, e),
        }

        if ticker.is_some() {
            match snapshot.map(|s| &s.news) {
                Some(Ok(items)) => {
                    let before = headlines.len();
                    for item in items {
                        if relevant(&item.title) {
                            headlines.insert(item.title.clone());
                        }
                    }
                    debug!("Equity news contributed {} headlines", headlines.len() - before);
                }
                Some(Err(e)) => warn!("Equity news unavailable for '{}': {}", company, e),
                None => debug!("No fundamentals snapshot, skipping equity news"),
            }
        }

        headlines
    }
}
