//! Sector risk profile from fundamentals metadata.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::FundamentalsSnapshot;

/// Sectors and industries that carry elevated structural risk.
pub const HIGH_RISK_KEYWORDS: &[&str] =
    &["Real Estate", "Banks - Regional", "Biotechnology", "Cryptocurrency"];

/// Sectors and industries with defensive, lower-risk profiles.
pub const LOW_RISK_KEYWORDS: &[&str] = &["Utilities", "Consumer Defensive", "Healthcare Plans"];

pub const HIGH_RISK_MODIFIER: f64 = 1.15;
pub const LOW_RISK_MODIFIER: f64 = 0.90;
pub const NEUTRAL_MODIFIER: f64 = 1.0;

/// Rule tables in evaluation order; the first table with a hit decides.
const SECTOR_RULES: &[(&[&str], f64)] = &[
    (HIGH_RISK_KEYWORDS, HIGH_RISK_MODIFIER),
    (LOW_RISK_KEYWORDS, LOW_RISK_MODIFIER),
];

/// Multiplier and display label for a company's sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorProfile {
    pub modifier: f64,
    pub label: String,
}

impl SectorProfile {
    fn neutral(label: &str) -> Self {
        Self {
            modifier: NEUTRAL_MODIFIER,
            label: label.to_string(),
        }
    }
}

/// Modifier for a sector/industry pair.
pub fn sector_modifier(sector: &str, industry: &str) -> f64 {
    SECTOR_RULES
        .iter()
        .find(|(keywords, _)| {
            keywords
                .iter()
                .any(|kw| industry.contains(kw) || sector.contains(kw))
        })
        .map(|(_, modifier)| *modifier)
        .unwrap_or(NEUTRAL_MODIFIER)
}

/// Classify the sector of a company, if it is listed.
pub fn classify_sector(snapshot: Option<&FundamentalsSnapshot>) -> SectorProfile {
    let Some(snapshot) = snapshot else {
        return SectorProfile::neutral("Unknown / Private");
    };

    match &snapshot.profile {
        Ok(profile) => {
            let sector = profile.sector.as_deref().unwrap_or("Unknown");
            let industry = profile.industry.as_deref().unwrap_or("Unknown");
            SectorProfile {
                modifier: sector_modifier(sector, industry),
                label: format!("{} - {}", sector, industry),
            }
        }
        Err(e) => {
            debug!("Sector profile unavailable for {}: {}", snapshot.ticker, e);
            SectorProfile::neutral("Unknown")
        }
    }
}
