//! Batch sentiment classification of short texts.
//!
//! [`SentimentClassifier`] is the capability the text scorer depends on. Two
//! backends ship with the crate: an offline financial lexicon and an LLM
//! prompted for JSON labels.

mod lexicon;
mod llm;

pub use lexicon::LexiconClassifier;
pub use llm::LlmClassifier;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClassifierError;

/// Three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            other => Err(ClassifierError::UnknownLabel(other.to_string())),
        }
    }
}

/// Label plus the classifier's confidence in it (0 to 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl Classification {
    pub fn new(label: SentimentLabel, confidence: f64) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn negative(confidence: f64) -> Self {
        Self::new(SentimentLabel::Negative, confidence)
    }

    pub fn positive(confidence: f64) -> Self {
        Self::new(SentimentLabel::Positive, confidence)
    }

    pub fn neutral(confidence: f64) -> Self {
        Self::new(SentimentLabel::Neutral, confidence)
    }
}

/// Classifies a batch of texts, one result per input in input order.
pub trait SentimentClassifier {
    /// Short engine name for banners and logs.
    fn name(&self) -> &str;

    fn classify_batch(&self, texts: &[String]) -> Result<Vec<Classification>, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing() {
        assert_eq!("Negative".parse::<SentimentLabel>().unwrap(), SentimentLabel::Negative);
        assert_eq!(" neutral ".parse::<SentimentLabel>().unwrap(), SentimentLabel::Neutral);
        assert!(matches!(
            "bullish".parse::<SentimentLabel>(),
            Err(ClassifierError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(Classification::negative(1.4).confidence, 1.0);
        assert_eq!(Classification::positive(-0.2).confidence, 0.0);
    }
}
