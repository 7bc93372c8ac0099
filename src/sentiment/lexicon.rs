//! # Financial Lexicon Classifier
//!
//! Offline rule-based classifier tuned for corporate news headlines.

use std::collections::HashMap;

use super::{Classification, SentimentClassifier, SentimentLabel};
use crate::error::ClassifierError;

/// Scores at or beyond this magnitude are polar rather than neutral.
const POLARITY_THRESHOLD: f64 = 0.15;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("beat", 0.6),
    ("beats", 0.6),
    ("surge", 0.7),
    ("surges", 0.7),
    ("soar", 0.8),
    ("soars", 0.8),
    ("rally", 0.6),
    ("rallies", 0.6),
    ("gain", 0.5),
    ("gains", 0.5),
    ("growth", 0.6),
    ("profit", 0.6),
    ("profits", 0.6),
    ("record", 0.5),
    ("upgrade", 0.6),
    ("upgraded", 0.6),
    ("outperform", 0.7),
    ("strong", 0.5),
    ("expands", 0.4),
    ("expansion", 0.4),
    ("partnership", 0.4),
    ("approval", 0.5),
    ("approved", 0.5),
    ("wins", 0.5),
    ("dividend", 0.4),
    ("recovery", 0.5),
    ("rebound", 0.5),
    ("cleared", 0.5),
    ("settles", 0.2),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("bankruptcy", -0.95),
    ("bankrupt", -0.95),
    ("insolvency", -0.9),
    ("default", -0.8),
    ("fraud", -0.9),
    ("scandal", -0.8),
    ("indictment", -0.85),
    ("indicted", -0.85),
    ("charged", -0.7),
    ("investigation", -0.6),
    ("probe", -0.6),
    ("subpoena", -0.6),
    ("lawsuit", -0.6),
    ("sued", -0.6),
    ("sues", -0.5),
    ("litigation", -0.5),
    ("fined", -0.6),
    ("penalty", -0.6),
    ("recall", -0.6),
    ("layoffs", -0.6),
    ("resigns", -0.5),
    ("ousted", -0.6),
    ("plunge", -0.8),
    ("plunges", -0.8),
    ("crash", -0.9),
    ("slump", -0.7),
    ("falls", -0.5),
    ("drop", -0.5),
    ("drops", -0.5),
    ("loss", -0.6),
    ("losses", -0.6),
    ("miss", -0.6),
    ("misses", -0.6),
    ("downgrade", -0.6),
    ("downgraded", -0.6),
    ("warning", -0.5),
    ("warns", -0.5),
    ("risk", -0.3),
    ("concern", -0.4),
    ("concerns", -0.4),
    ("breach", -0.7),
    ("hack", -0.7),
    ("crisis", -0.8),
    ("delisted", -0.8),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "without", "denies", "dismissed", "dropped", "cannot", "isn't",
    "wasn't", "won't", "doesn't", "didn't",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("major", 1.4),
    ("massive", 1.6),
    ("sharply", 1.5),
    ("significant", 1.3),
    ("record", 1.3),
    ("widening", 1.3),
    ("federal", 1.2),
    ("slightly", 0.5),
    ("minor", 0.6),
];

/// Lexicon-based headline classifier.
pub struct LexiconClassifier {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    pub fn new() -> Self {
        Self {
            words: POSITIVE_WORDS
                .iter()
                .chain(NEGATIVE_WORDS.iter())
                .copied()
                .collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    /// Classify one text.
    ///
    /// Words after a negation flip sign; an intensifier scales the next
    /// sentiment word. The mean matched score picks the label.
    pub fn classify(&self, text: &str) -> Classification {
        let tokens: Vec<String> = text
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();

        let mut scores = Vec::new();
        let mut negate_next = false;
        let mut intensifier = 1.0;

        for token in &tokens {
            if NEGATIONS.contains(&token.as_str()) {
                negate_next = true;
                continue;
            }

            let word_score = self.words.get(token.as_str()).copied();
            let boost = self.intensifiers.get(token.as_str()).copied();

            match (word_score, boost) {
                (Some(mut score), _) => {
                    if negate_next {
                        score = -score * 0.5;
                        negate_next = false;
                    }
                    scores.push(score * intensifier);
                    intensifier = 1.0;
                }
                (None, Some(mult)) => intensifier = mult,
                (None, None) => {}
            }
        }

        if scores.is_empty() {
            return Classification::neutral(0.5);
        }

        let score = (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0);
        let coverage = (scores.len() as f64 / tokens.len().max(1) as f64).min(1.0);
        let strength = score.abs();

        if strength < POLARITY_THRESHOLD {
            return Classification::neutral((0.95 - strength).max(0.5));
        }

        let confidence = (0.3 + 0.4 * coverage + 0.3 * strength).min(0.95);
        let label = if score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Positive
        };
        Classification::new(label, confidence)
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn name(&self) -> &str {
        "Financial Lexicon"
    }

    fn classify_batch(&self, texts: &[String]) -> Result<Vec<Classification>, ClassifierError> {
        Ok(texts.iter().map(|t| self.classify(t)).collect())
    }
}
