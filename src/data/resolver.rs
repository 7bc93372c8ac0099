//! Company name to ticker resolution.

use tracing::{debug, info};

use super::CompanySearch;
use crate::error::DataError;

/// Resolves free-text company names to ticker symbols.
pub struct TickerResolver<'a> {
    search: &'a dyn CompanySearch,
}

impl<'a> TickerResolver<'a> {
    pub fn new(search: &'a dyn CompanySearch) -> Self {
        Self { search }
    }

    /// First candidate's symbol, with the failure cause preserved.
    pub fn try_resolve(&self, name: &str) -> Result<String, DataError> {
        let candidates = self.search.search(name)?;
        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| DataError::Empty(format!("company search '{}'", name)))?;

        if first.symbol.trim().is_empty() {
            return Err(DataError::MissingField("symbol".to_string()));
        }
        Ok(first.symbol)
    }

    /// Ticker for `name`, or `None` when the company looks private or unlisted.
    pub fn resolve(&self, name: &str) -> Option<String> {
        match self.try_resolve(name) {
            Ok(symbol) => {
                info!("Resolved '{}' to ticker {}", name, symbol);
                Some(symbol)
            }
            Err(e) => {
                debug!("No ticker for '{}': {}", name, e);
                None
            }
        }
    }
}
