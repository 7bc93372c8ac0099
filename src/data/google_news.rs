//! Google News RSS search feed.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use super::{FeedEntry, FeedSearch};
use crate::error::DataError;
use crate::utils::DataConfig;

/// Google News RSS search client.
pub struct GoogleNewsFeed {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for GoogleNewsFeed {
    fn default() -> Self {
        Self::from_config(&DataConfig::default())
    }
}

impl GoogleNewsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DataConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(config.user_agent.clone())
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: config.news_feed_url.clone(),
            timeout,
        }
    }
}

impl FeedSearch for GoogleNewsFeed {
    fn search(&self, query: &str) -> Result<Vec<FeedEntry>, DataError> {
        debug!("Google News search: {}", query);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")])
            .timeout(self.timeout)
            .send()?;

        if !response.status().is_success() {
            return Err(DataError::Status {
                source_name: "Google News".to_string(),
                status: response.status().as_u16(),
            });
        }

        let content = response.bytes()?;
        parse_feed(&content[..])
    }
}

/// Every entry of an RSS 2.0 document, in feed order.
///
/// Untitled items are kept with an empty title so they still count
/// towards the per-query entry limit.
fn parse_feed(content: &[u8]) -> Result<Vec<FeedEntry>, DataError> {
    let channel = rss::Channel::read_from(content)?;

    Ok(channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().map(str::to_string),
        })
        .collect())
}
