//! Solvency and liquidity composite from the most recent balance sheet.

use thiserror::Error;

use crate::data::{
    BalanceSheet, FundamentalsSnapshot, CURRENT_ASSETS, CURRENT_LIABILITIES, TOTAL_ASSETS,
    TOTAL_LIABILITIES, TOTAL_LIABILITIES_NET_MINORITY_INTEREST,
};

/// Liability labels in order of preference.
pub const LIABILITY_LABELS: &[&str] = &[TOTAL_LIABILITIES_NET_MINORITY_INTEREST, TOTAL_LIABILITIES];

/// Current ratio at which liquidity risk reaches zero.
pub const HEALTHY_CURRENT_RATIO: f64 = 1.5;

/// Why no financial score could be produced.
#[derive(Error, Debug)]
pub enum FinancialError {
    #[error("no fundamentals available")]
    NoFundamentals,

    #[error("balance sheet unavailable: {0}")]
    Fetch(String),

    #[error("balance sheet is empty")]
    EmptyBalanceSheet,

    #[error("no liability line item")]
    NoLiabilityLabel,

    #[error("missing figure for '{0}'")]
    MissingFigure(String),

    #[error("'{0}' is zero or not finite")]
    InvalidDivisor(String),
}

/// Solvency and liquidity risk, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialBreakdown {
    pub solvency_risk: f64,
    pub current_ratio: f64,
    pub liquidity_risk: f64,
}

impl FinancialBreakdown {
    /// Equal-weight composite of solvency and liquidity risk.
    pub fn score(&self) -> f64 {
        0.5 * self.solvency_risk + 0.5 * self.liquidity_risk
    }
}

fn figure(sheet: &BalanceSheet, label: &str) -> Result<f64, FinancialError> {
    sheet
        .value(label, 0)
        .filter(|v| !v.is_nan())
        .ok_or_else(|| FinancialError::MissingFigure(label.to_string()))
}

fn divisor(sheet: &BalanceSheet, label: &str) -> Result<f64, FinancialError> {
    let value = figure(sheet, label)?;
    if value == 0.0 || !value.is_finite() {
        return Err(FinancialError::InvalidDivisor(label.to_string()));
    }
    Ok(value)
}

/// Break down the most recent column of a balance sheet.
pub fn analyse_balance_sheet(sheet: &BalanceSheet) -> Result<FinancialBreakdown, FinancialError> {
    if sheet.is_empty() {
        return Err(FinancialError::EmptyBalanceSheet);
    }

    let assets = divisor(sheet, TOTAL_ASSETS)?;
    let liability_label = LIABILITY_LABELS
        .iter()
        .find(|label| sheet.has_item(label))
        .ok_or(FinancialError::NoLiabilityLabel)?;
    let liabilities = figure(sheet, liability_label)?;
    let solvency_risk = (liabilities / assets * 100.0).min(100.0);

    let current_assets = figure(sheet, CURRENT_ASSETS)?;
    let current_liabilities = divisor(sheet, CURRENT_LIABILITIES)?;
    let current_ratio = current_assets / current_liabilities;
    let liquidity_risk = ((HEALTHY_CURRENT_RATIO - current_ratio) * 100.0).clamp(0.0, 100.0);

    let breakdown = FinancialBreakdown {
        solvency_risk,
        current_ratio,
        liquidity_risk,
    };
    if !breakdown.score().is_finite() {
        return Err(FinancialError::MissingFigure(liability_label.to_string()));
    }
    Ok(breakdown)
}

/// Financial signal for a company, with the reason when unavailable.
pub fn financial_score(snapshot: Option<&FundamentalsSnapshot>) -> Result<f64, FinancialError> {
    let snapshot = snapshot.ok_or(FinancialError::NoFundamentals)?;
    let sheet = snapshot
        .balance_sheet
        .as_ref()
        .map_err(|e| FinancialError::Fetch(e.to_string()))?;
    Ok(analyse_balance_sheet(sheet)?.score())
}
