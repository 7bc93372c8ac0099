//! Fundamentals snapshot: company profile, balance sheet and recent news.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::DataError;

/// Balance sheet label for total assets.
pub const TOTAL_ASSETS: &str = "Total Assets";
/// Preferred balance sheet label for total liabilities.
pub const TOTAL_LIABILITIES_NET_MINORITY_INTEREST: &str = "Total Liabilities Net Minority Interest";
/// Fallback balance sheet label for total liabilities.
pub const TOTAL_LIABILITIES: &str = "Total Liabilities";
/// Balance sheet label for current assets.
pub const CURRENT_ASSETS: &str = "Current Assets";
/// Balance sheet label for current liabilities.
pub const CURRENT_LIABILITIES: &str = "Current Liabilities";

/// A company officer as reported by the fundamentals provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Officer {
    /// Officer name, when reported.
    pub name: Option<String>,
    /// Free-text title such as "CEO & Director".
    pub title: Option<String>,
}

impl Officer {
    pub fn titled(title: &str) -> Self {
        Self {
            name: None,
            title: Some(title.to_string()),
        }
    }
}

/// Descriptive profile of a listed company.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub sector: Option<String>,
    pub industry: Option<String>,
    /// `None` when the provider omitted the officer list entirely.
    pub officers: Option<Vec<Officer>>,
}

impl CompanyProfile {
    pub fn new(sector: &str, industry: &str) -> Self {
        Self {
            sector: Some(sector.to_string()),
            industry: Some(industry.to_string()),
            officers: None,
        }
    }

    pub fn with_officers(mut self, officers: Vec<Officer>) -> Self {
        self.officers = Some(officers);
        self
    }
}

/// Balance sheet line items by label and reporting period.
///
/// Periods are kept newest first, so column `0` is the most recent report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    periods: Vec<NaiveDate>,
    items: HashMap<String, Vec<Option<f64>>>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from per-label `(period, value)` observations.
    pub fn from_observations(observations: HashMap<String, Vec<(NaiveDate, f64)>>) -> Self {
        let mut periods: Vec<NaiveDate> = observations
            .values()
            .flat_map(|obs| obs.iter().map(|(date, _)| *date))
            .collect();
        periods.sort_by(|a, b| b.cmp(a));
        periods.dedup();

        let items = observations
            .into_iter()
            .map(|(label, obs)| {
                let column = periods
                    .iter()
                    .map(|period| obs.iter().find(|(d, _)| d == period).map(|(_, v)| *v))
                    .collect();
                (label, column)
            })
            .collect();

        Self { periods, items }
    }

    /// Add a line item whose values follow the sheet's period order.
    pub fn with_item(mut self, label: &str, values: Vec<Option<f64>>) -> Self {
        if self.periods.is_empty() && !values.is_empty() {
            // Synthetic periods keep column indexing consistent for hand-built sheets.
            self.periods = (0..values.len())
                .filter_map(|i| NaiveDate::from_ymd_opt(2000 - i as i32, 12, 31))
                .collect();
        }
        self.items.insert(label.to_string(), values);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() || self.periods.is_empty()
    }

    pub fn has_item(&self, label: &str) -> bool {
        self.items.contains_key(label)
    }

    /// Value of a line item in the given column, if reported.
    pub fn value(&self, label: &str, column: usize) -> Option<f64> {
        self.items.get(label)?.get(column).copied().flatten()
    }
}

/// A recent news item attached to an equity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Title or headline.
    pub title: String,
    /// Publisher name if available.
    pub publisher: Option<String>,
    /// URL to the original source.
    pub url: Option<String>,
    /// Publication timestamp if available.
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsItem {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            publisher: None,
            url: None,
            published_at: None,
        }
    }
}

/// Everything known about a ticker for one analysis run.
///
/// Each part is fetched independently and keeps its own outcome.
#[derive(Debug)]
pub struct FundamentalsSnapshot {
    pub ticker: String,
    pub profile: Result<CompanyProfile, DataError>,
    pub balance_sheet: Result<BalanceSheet, DataError>,
    pub news: Result<Vec<NewsItem>, DataError>,
}

impl FundamentalsSnapshot {
    /// Snapshot with every part present, mostly for tests and fixtures.
    pub fn new(
        ticker: &str,
        profile: CompanyProfile,
        balance_sheet: BalanceSheet,
        news: Vec<NewsItem>,
    ) -> Self {
        Self {
            ticker: ticker.to_string(),
            profile: Ok(profile),
            balance_sheet: Ok(balance_sheet),
            news: Ok(news),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_balance_sheet_orders_periods_newest_first() {
        let mut obs = HashMap::new();
        obs.insert(
            TOTAL_ASSETS.to_string(),
            vec![(date(2022, 12, 31), 90.0), (date(2023, 12, 31), 100.0)],
        );
        obs.insert(CURRENT_ASSETS.to_string(), vec![(date(2022, 12, 31), 40.0)]);

        let sheet = BalanceSheet::from_observations(obs);

        assert_eq!(sheet.value(TOTAL_ASSETS, 0), Some(100.0));
        assert_eq!(sheet.value(TOTAL_ASSETS, 1), Some(90.0));
        assert_eq!(sheet.value(CURRENT_ASSETS, 0), None);
        assert_eq!(sheet.value(CURRENT_ASSETS, 1), Some(40.0));
    }

    #[test]
    fn test_empty_balance_sheet() {
        assert!(BalanceSheet::new().is_empty());
        assert!(!BalanceSheet::new().with_item(TOTAL_ASSETS, vec![Some(1.0)]).is_empty());
    }
}
