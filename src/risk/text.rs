//! News-sentiment and legal-exposure scores from headlines.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClassifierError;
use crate::sentiment::{Classification, SentimentClassifier, SentimentLabel};

/// Maximum number of headlines sent to the classifier.
pub const MAX_SCORED_HEADLINES: usize = 20;

/// Legal and regulatory keywords by severity, checked in this order.
pub const SEVERITY_MAP: &[(&str, f64)] = &[
    ("bankruptcy", 80.0),
    ("fraud", 70.0),
    ("indictment", 70.0),
    ("sec", 40.0),
    ("investigation", 40.0),
    ("probe", 40.0),
    ("lawsuit", 20.0),
    ("sued", 20.0),
    ("litigation", 20.0),
];

/// Legal weight multiplier for keyword hits in non-negative headlines.
const NON_NEGATIVE_CONTEXT: f64 = 0.2;

/// Fixed news-risk contribution of a neutral headline.
const NEUTRAL_NEWS_RISK: f64 = 20.0;

/// The two headline-derived signals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextScores {
    pub news: f64,
    pub legal: f64,
}

/// First severity keyword contained in a lower-cased headline.
pub fn severity_of(headline_lower: &str) -> Option<(&'static str, f64)> {
    SEVERITY_MAP
        .iter()
        .find(|(keyword, _)| headline_lower.contains(keyword))
        .copied()
}

/// News-risk contribution of one classified headline.
fn news_contribution(classification: &Classification) -> f64 {
    match classification.label {
        SentimentLabel::Negative => classification.confidence * 100.0,
        SentimentLabel::Positive => -classification.confidence * 50.0,
        SentimentLabel::Neutral => NEUTRAL_NEWS_RISK,
    }
}

/// Score headlines that have already been classified.
///
/// `headlines` and `classifications` are paired by position.
pub fn score_classified(headlines: &[String], classifications: &[Classification]) -> TextScores {
    if headlines.is_empty() {
        return TextScores::default();
    }

    let mut news_accum = 0.0;
    let mut legal_accum = 0.0;

    for (headline, classification) in headlines.iter().zip(classifications) {
        news_accum += news_contribution(classification);

        if let Some((keyword, weight)) = severity_of(&headline.to_lowercase()) {
            let context = if classification.label == SentimentLabel::Negative {
                classification.confidence
            } else {
                NON_NEGATIVE_CONTEXT
            };
            debug!("Legal keyword '{}' in: {}", keyword, headline);
            legal_accum += weight * context;
        }
    }

    TextScores {
        news: (news_accum / headlines.len() as f64).clamp(0.0, 100.0),
        legal: legal_accum.min(100.0),
    }
}

/// Scores headlines through an injected sentiment classifier.
pub struct TextScorer<'a> {
    classifier: &'a dyn SentimentClassifier,
    max_headlines: usize,
}

impl<'a> TextScorer<'a> {
    pub fn new(classifier: &'a dyn SentimentClassifier) -> Self {
        Self {
            classifier,
            max_headlines: MAX_SCORED_HEADLINES,
        }
    }

    pub fn with_max_headlines(mut self, max: usize) -> Self {
        self.max_headlines = max;
        self
    }

    /// Classify at most `max_headlines` headlines in one batch and score them.
    pub fn score(&self, headlines: &[String]) -> Result<TextScores, ClassifierError> {
        if headlines.is_empty() {
            return Ok(TextScores::default());
        }

        let scored = &headlines[..headlines.len().min(self.max_headlines)];
        let classifications = self.classifier.classify_batch(scored)?;

        if classifications.len() != scored.len() {
            return Err(ClassifierError::CountMismatch {
                expected: scored.len(),
                actual: classifications.len(),
            });
        }

        Ok(score_classified(scored, &classifications))
    }
}
