//! Dark Risk Radar
//!
//! Scores the hidden risk of a public or private company on a 0-100 scale
//! from whatever evidence can be gathered about it.
//!
//! # Features
//!
//! - Resolve a free-text company name to a listed ticker
//! - Score balance-sheet solvency and liquidity
//! - Score gaps in the leadership roster
//! - Classify recent headlines for news and legal risk
//! - Combine the available signals with renormalized weights and a sector modifier

pub mod data;
pub mod error;
pub mod llm;
pub mod radar;
pub mod risk;
pub mod sentiment;
pub mod session;
pub mod utils;

pub use data::{GoogleNewsFeed, YahooClient};
pub use error::{ClassifierError, DataError};
pub use radar::RiskRadar;
pub use risk::{RiskReport, SignalScores, StatusBand, WeightTable};
pub use sentiment::{LexiconClassifier, SentimentClassifier};
pub use session::run_session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
