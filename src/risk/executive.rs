//! Governance-gap score from leadership roster completeness.

use tracing::debug;

use crate::data::{FundamentalsSnapshot, Officer};

/// Expected roles and the risk added when a role is missing.
pub const ROLE_WEIGHTS: &[(&str, f64)] = &[
    ("ceo", 35.0),
    ("cfo", 30.0),
    ("coo", 15.0),
    ("president", 10.0),
    ("counsel", 5.0),
    ("cto", 5.0),
];

/// Score for a company that publishes no officer list.
pub const OPAQUE_ROSTER_SCORE: f64 = 85.0;

/// Score when the profile could not be fetched at all.
pub const UNKNOWN_ROSTER_SCORE: f64 = 50.0;

/// Risk from a list of officers.
///
/// Roles are matched as substrings of the joined, lower-cased titles, so a
/// title must literally contain "ceo", "cfo" and so on to count.
pub fn roster_gap_score(officers: &[Officer]) -> f64 {
    if officers.is_empty() {
        return OPAQUE_ROSTER_SCORE;
    }

    let titles = officers
        .iter()
        .map(|o| o.title.as_deref().unwrap_or("").to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let risk: f64 = ROLE_WEIGHTS
        .iter()
        .filter(|(role, _)| !titles.contains(role))
        .map(|(_, weight)| weight)
        .sum();

    risk.min(100.0)
}

/// Executive signal for a listed company.
pub fn executive_score(snapshot: &FundamentalsSnapshot) -> f64 {
    match &snapshot.profile {
        Ok(profile) => roster_gap_score(profile.officers.as_deref().unwrap_or(&[])),
        Err(e) => {
            debug!("Officer list unavailable for {}: {}", snapshot.ticker, e);
            UNKNOWN_ROSTER_SCORE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BalanceSheet, CompanyProfile};
    use crate::error::DataError;

    fn officers(titles: &[&str]) -> Vec<Officer> {
        titles.iter().map(|t| Officer::titled(t)).collect()
    }

    #[test]
    fn test_empty_roster_is_opaque() {
        assert_eq!(roster_gap_score(&[]), 85.0);
    }

    #[test]
    fn test_spelled_out_titles_count_as_missing() {
        let score = roster_gap_score(&officers(&["Chief Executive Officer", "Chief Financial Officer"]));
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_abbreviated_titles() {
        let score = roster_gap_score(&officers(&[
            "CEO & Director",
            "CFO & Senior VP",
            "President",
            "Senior VP, General Counsel & Secretary",
        ]));
        // "director" contains "cto", so only coo is missing
        assert_eq!(score, 15.0);
    }

    #[test]
    fn test_full_roster() {
        let score = roster_gap_score(&officers(&[
            "CEO", "CFO", "COO", "President", "General Counsel", "CTO",
        ]));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_untitled_officers() {
        let roster = vec![Officer::default(), Officer::titled("CEO")];
        assert_eq!(roster_gap_score(&roster), 65.0);
    }

    #[test]
    fn test_snapshot_fallbacks() {
        let missing_officers = FundamentalsSnapshot::new(
            "ACME",
            CompanyProfile::new("Technology", "Software"),
            BalanceSheet::new(),
            Vec::new(),
        );
        assert_eq!(executive_score(&missing_officers), 85.0);

        let failed = FundamentalsSnapshot {
            ticker: "ACME".to_string(),
            profile: Err(DataError::Empty("assetProfile".to_string())),
            balance_sheet: Ok(BalanceSheet::new()),
            news: Ok(Vec::new()),
        };
        assert_eq!(executive_score(&failed), 50.0);
    }
}
