//! Risk scoring: the four signal calculators, the sector profile and the
//! weighted aggregation that combines them.

mod aggregator;
mod executive;
mod financial;
mod report;
mod sector;
mod text;

pub use aggregator::{aggregate, Aggregate, AggregateError, Signal, SignalScores, StatusBand, WeightTable};
pub use executive::{executive_score, roster_gap_score, OPAQUE_ROSTER_SCORE, ROLE_WEIGHTS, UNKNOWN_ROSTER_SCORE};
pub use financial::{analyse_balance_sheet, financial_score, FinancialBreakdown, FinancialError};
pub use report::RiskReport;
pub use sector::{classify_sector, sector_modifier, SectorProfile, HIGH_RISK_KEYWORDS, LOW_RISK_KEYWORDS};
pub use text::{score_classified, severity_of, TextScorer, TextScores, MAX_SCORED_HEADLINES, SEVERITY_MAP};
