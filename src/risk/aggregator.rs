//! Weighted aggregation of the four risk signals.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One of the four independently computed risk signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Fin,
    Legal,
    Exec,
    News,
}

impl Signal {
    /// Every signal, in report order.
    pub const ALL: [Signal; 4] = [Signal::Fin, Signal::Legal, Signal::Exec, Signal::News];

    pub fn key(&self) -> &'static str {
        match self {
            Signal::Fin => "fin",
            Signal::Legal => "legal",
            Signal::Exec => "exec",
            Signal::News => "news",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fixed relative importance of each signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    pub fin: f64,
    pub legal: f64,
    pub exec: f64,
    pub news: f64,
}

impl WeightTable {
    /// The weights used for every analysis; they sum to 1.0.
    pub const STANDARD: WeightTable = WeightTable {
        fin: 0.40,
        legal: 0.25,
        exec: 0.20,
        news: 0.15,
    };

    pub fn weight(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Fin => self.fin,
            Signal::Legal => self.legal,
            Signal::Exec => self.exec,
            Signal::News => self.news,
        }
    }

    /// Weights rescaled to sum to 1.0 over `active` signals only.
    pub fn renormalized(&self, active: &[Signal]) -> Vec<(Signal, f64)> {
        let total: f64 = active.iter().map(|s| self.weight(*s)).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        active
            .iter()
            .map(|s| (*s, self.weight(*s) / total))
            .collect()
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Per-signal scores in [0, 100]; `None` marks an unavailable signal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalScores {
    pub fin: Option<f64>,
    pub legal: Option<f64>,
    pub exec: Option<f64>,
    pub news: Option<f64>,
}

impl SignalScores {
    pub fn get(&self, signal: Signal) -> Option<f64> {
        match signal {
            Signal::Fin => self.fin,
            Signal::Legal => self.legal,
            Signal::Exec => self.exec,
            Signal::News => self.news,
        }
    }

    /// Available signals with their scores, in report order.
    pub fn active(&self) -> Vec<(Signal, f64)> {
        Signal::ALL
            .iter()
            .filter_map(|s| self.get(*s).map(|score| (*s, score)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }
}

/// Three-band status of a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusBand {
    Critical,
    Caution,
    Stable,
}

impl StatusBand {
    pub const CRITICAL_THRESHOLD: f64 = 70.0;
    pub const CAUTION_THRESHOLD: f64 = 40.0;

    /// Band for a final score; thresholds belong to the more severe band.
    pub fn from_score(score: f64) -> Self {
        if score >= Self::CRITICAL_THRESHOLD {
            StatusBand::Critical
        } else if score >= Self::CAUTION_THRESHOLD {
            StatusBand::Caution
        } else {
            StatusBand::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusBand::Critical => "CRITICAL",
            StatusBand::Caution => "CAUTION",
            StatusBand::Stable => "STABLE",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StatusBand::Critical => "🚨",
            StatusBand::Caution => "⚠️",
            StatusBand::Stable => "✅",
        }
    }
}

impl fmt::Display for StatusBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    #[error("No data could be retrieved.")]
    NoData,
}

/// Final aggregated score and its band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Renormalized weighted average before the sector modifier.
    pub base: f64,
    pub score: f64,
    pub status: StatusBand,
}

/// Combine the available signals into one score.
pub fn aggregate(
    scores: &SignalScores,
    weights: &WeightTable,
    sector_modifier: f64,
) -> Result<Aggregate, AggregateError> {
    let active = scores.active();
    if active.is_empty() {
        return Err(AggregateError::NoData);
    }

    let signals: Vec<Signal> = active.iter().map(|(s, _)| *s).collect();
    let base: f64 = weights
        .renormalized(&signals)
        .iter()
        .zip(&active)
        .map(|((_, weight), (_, score))| score * weight)
        .sum();

    let score = (base * sector_modifier).min(100.0);
    Ok(Aggregate {
        base,
        score,
        status: StatusBand::from_score(score),
    })
}
