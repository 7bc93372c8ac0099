//! One-company analysis pipeline.

use tracing::{debug, info, warn};

use crate::data::{CompanySearch, FeedSearch, FundamentalsSource, HeadlineCollector, TickerResolver};
use crate::risk::{
    aggregate, classify_sector, executive_score, financial_score, AggregateError, RiskReport,
    SignalScores, TextScorer, WeightTable,
};
use crate::sentiment::SentimentClassifier;
use crate::utils::DataConfig;

/// Owns the data capabilities and the classifier used for every analysis.
pub struct RiskRadar {
    search: Box<dyn CompanySearch>,
    fundamentals: Box<dyn FundamentalsSource>,
    feed: Box<dyn FeedSearch>,
    classifier: Box<dyn SentimentClassifier>,
    weights: WeightTable,
    feed_max_entries: usize,
    max_scored_headlines: usize,
}

impl RiskRadar {
    pub fn new(
        search: Box<dyn CompanySearch>,
        fundamentals: Box<dyn FundamentalsSource>,
        feed: Box<dyn FeedSearch>,
        classifier: Box<dyn SentimentClassifier>,
    ) -> Self {
        let defaults = DataConfig::default();
        Self {
            search,
            fundamentals,
            feed,
            classifier,
            weights: WeightTable::STANDARD,
            feed_max_entries: defaults.feed_max_entries,
            max_scored_headlines: defaults.max_scored_headlines,
        }
    }

    /// Apply the headline limits from a data configuration.
    pub fn with_limits(mut self, config: &DataConfig) -> Self {
        self.feed_max_entries = config.feed_max_entries;
        self.max_scored_headlines = config.max_scored_headlines;
        self
    }

    /// Name of the sentiment engine in use.
    pub fn engine_name(&self) -> &str {
        self.classifier.name()
    }

    /// Analyse one company.
    ///
    /// Every fetch or classification failure only removes the affected
    /// signal; the error is returned when no signal survives.
    pub fn analyse(&self, company: &str) -> Result<RiskReport, AggregateError> {
        let ticker = TickerResolver::new(self.search.as_ref()).resolve(company);
        let snapshot = ticker
            .as_deref()
            .map(|t| self.fundamentals.snapshot(t));

        let sector = classify_sector(snapshot.as_ref());
        debug!("Sector profile: {} ({}x)", sector.label, sector.modifier);

        let mut headlines: Vec<String> = HeadlineCollector::new(self.feed.as_ref())
            .with_max_feed_entries(self.feed_max_entries)
            .collect(company, ticker.as_deref(), snapshot.as_ref())
            .into_iter()
            .collect();
        headlines.sort();
        info!("Collected {} distinct headlines for '{}'", headlines.len(), company);

        let text = match TextScorer::new(self.classifier.as_ref())
            .with_max_headlines(self.max_scored_headlines)
            .score(&headlines)
        {
            Ok(scores) => Some(scores),
            Err(e) => {
                warn!("Headline classification failed with {}: {}", self.engine_name(), e);
                None
            }
        };

        let fin = match financial_score(snapshot.as_ref()) {
            Ok(score) => Some(score),
            Err(e) => {
                debug!("Financial signal unavailable: {}", e);
                None
            }
        };

        let signals = SignalScores {
            fin,
            legal: text.map(|t| t.legal),
            exec: snapshot.as_ref().map(executive_score),
            news: text.map(|t| t.news),
        };

        let aggregate = aggregate(&signals, &self.weights, sector.modifier)?;

        Ok(RiskReport {
            company: company.to_string(),
            ticker,
            sector,
            signals,
            aggregate,
            headline_count: headlines.len(),
        })
    }
}
