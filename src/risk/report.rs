//! Console report for one company analysis.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::aggregator::{Aggregate, SignalScores, StatusBand};
use super::sector::SectorProfile;

const SECTION_DIVIDER_WIDTH: usize = 35;

/// Result of analysing one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub company: String,
    pub ticker: Option<String>,
    pub sector: SectorProfile,
    pub signals: SignalScores,
    pub aggregate: Aggregate,
    /// Number of distinct headlines collected before truncation.
    pub headline_count: usize,
}

impl RiskReport {
    pub fn final_score(&self) -> f64 {
        self.aggregate.score
    }

    pub fn status(&self) -> StatusBand {
        self.aggregate.status
    }
}

/// Shortest form of a modifier that still shows one decimal, e.g. `1.0`, `1.15`.
fn format_modifier(modifier: f64) -> String {
    if modifier.fract() == 0.0 {
        format!("{:.1}", modifier)
    } else {
        modifier.to_string()
    }
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = "-".repeat(SECTION_DIVIDER_WIDTH);

        writeln!(f)?;
        writeln!(f, "🏢 Sector Profile: {}", self.sector.label)?;
        writeln!(f, "⚖️ Sector Modifier: {}x", format_modifier(self.sector.modifier))?;
        writeln!(f, "{}", divider)?;
        for (signal, score) in self.signals.active() {
            writeln!(f, " -> {:<6}: {:.2}", signal.key().to_uppercase(), score)?;
        }
        writeln!(f, "{}", divider)?;
        writeln!(f, "🎯 TRUE GRANULAR RISK: {:.2} / 100", self.final_score())?;
        writeln!(f)?;

        let status = self.status().to_string();
        let status = match self.status() {
            StatusBand::Critical => status.red().bold(),
            StatusBand::Caution => status.yellow().bold(),
            StatusBand::Stable => status.green().bold(),
        };
        write!(f, "STATUS: {}", status)
    }
}
