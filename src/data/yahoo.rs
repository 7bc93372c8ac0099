//! Yahoo Finance adapter for company search, profiles, balance sheets and news.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use super::fundamentals::{
    BalanceSheet, CompanyProfile, NewsItem, Officer, CURRENT_ASSETS, CURRENT_LIABILITIES,
    TOTAL_ASSETS, TOTAL_LIABILITIES, TOTAL_LIABILITIES_NET_MINORITY_INTEREST,
};
use super::{CompanySearch, FundamentalsSource, TickerCandidate};
use crate::error::DataError;
use crate::utils::DataConfig;

/// Yahoo time series types and the balance sheet labels they map to.
const BALANCE_SHEET_SERIES: &[(&str, &str)] = &[
    ("annualTotalAssets", TOTAL_ASSETS),
    (
        "annualTotalLiabilitiesNetMinorityInterest",
        TOTAL_LIABILITIES_NET_MINORITY_INTEREST,
    ),
    ("annualTotalLiabilities", TOTAL_LIABILITIES),
    ("annualCurrentAssets", CURRENT_ASSETS),
    ("annualCurrentLiabilities", CURRENT_LIABILITIES),
];

/// Start of the time series window (2016-01-01).
const SERIES_PERIOD_START: i64 = 1_451_606_400;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
    #[serde(default)]
    news: Vec<SearchNews>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    symbol: Option<String>,
    shortname: Option<String>,
    exchange: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchNews {
    title: Option<String>,
    publisher: Option<String>,
    link: Option<String>,
    #[serde(rename = "providerPublishTime")]
    provider_publish_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    #[serde(rename = "assetProfile")]
    asset_profile: Option<AssetProfile>,
}

#[derive(Debug, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
    industry: Option<String>,
    #[serde(rename = "companyOfficers")]
    company_officers: Option<Vec<RawOfficer>>,
}

#[derive(Debug, Deserialize)]
struct RawOfficer {
    name: Option<String>,
    title: Option<String>,
}

/// Blocking Yahoo Finance client.
///
/// `quoteSummary` only answers requests that carry a session cookie and the
/// matching crumb; both are fetched on first use and kept for the client's
/// lifetime.
pub struct YahooClient {
    client: Client,
    search_url: String,
    quote_summary_url: String,
    timeseries_url: String,
    cookie_url: String,
    crumb_url: String,
    crumb: RefCell<Option<String>>,
    timeout: Duration,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::from_config(&DataConfig::default())
    }
}

impl YahooClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client using the endpoints, agent and timeout in `config`.
    pub fn from_config(config: &DataConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(config.user_agent.clone())
                .cookie_store(true)
                .build()
                .unwrap_or_else(|_| Client::new()),
            search_url: config.search_url.clone(),
            quote_summary_url: config.quote_summary_url.clone(),
            timeseries_url: config.timeseries_url.clone(),
            cookie_url: config.cookie_url.clone(),
            crumb_url: config.crumb_url.clone(),
            crumb: RefCell::new(None),
            timeout,
        }
    }

    /// Session crumb, performing the cookie handshake on first use.
    fn crumb(&self) -> Result<String, DataError> {
        if let Some(crumb) = self.crumb.borrow().as_ref() {
            return Ok(crumb.clone());
        }

        // The cookie endpoint answers 404 while still setting the session cookie.
        match self.client.get(&self.cookie_url).timeout(self.timeout).send() {
            Ok(response) => debug!("Cookie handshake answered {}", response.status()),
            Err(e) => debug!("Cookie handshake failed: {}", e),
        }

        let response = self
            .client
            .get(&self.crumb_url)
            .timeout(self.timeout)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                source_name: "Yahoo Finance crumb".to_string(),
                status: status.as_u16(),
            });
        }

        let crumb = response.text()?.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(DataError::Empty("Yahoo Finance crumb".to_string()));
        }

        debug!("Obtained Yahoo Finance crumb");
        *self.crumb.borrow_mut() = Some(crumb.clone());
        Ok(crumb)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, DataError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(self.timeout)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                source_name: "Yahoo Finance".to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn search_raw(&self, query: &str, quotes: u32, news: u32) -> Result<SearchResponse, DataError> {
        self.get_json(
            &self.search_url,
            &[
                ("q", query.to_string()),
                ("quotesCount", quotes.to_string()),
                ("newsCount", news.to_string()),
            ],
        )
    }
}

impl CompanySearch for YahooClient {
    fn search(&self, query: &str) -> Result<Vec<TickerCandidate>, DataError> {
        let response = self.search_raw(query, 6, 0)?;
        Ok(candidates(response))
    }
}

/// Quotes that carry a ticker symbol, in provider order.
fn candidates(response: SearchResponse) -> Vec<TickerCandidate> {
    response
        .quotes
        .into_iter()
        .filter_map(|quote| {
            let Some(symbol) = quote.symbol else {
                debug!("Skipping quote without symbol: {:?}", quote.shortname);
                return None;
            };
            Some(TickerCandidate {
                symbol,
                name: quote.shortname,
                exchange: quote.exchange,
            })
        })
        .collect()
}

impl FundamentalsSource for YahooClient {
    fn profile(&self, ticker: &str) -> Result<CompanyProfile, DataError> {
        let url = format!("{}/{}", self.quote_summary_url, ticker);
        let crumb = self.crumb()?;
        let envelope = match self.get_json::<QuoteSummaryEnvelope>(
            &url,
            &[("modules", "assetProfile".to_string()), ("crumb", crumb)],
        ) {
            Err(DataError::Status { status: 401, .. }) => {
                warn!("Yahoo Finance rejected the session crumb for {}", ticker);
                self.crumb.borrow_mut().take();
                return Err(DataError::Status {
                    source_name: "Yahoo Finance quoteSummary".to_string(),
                    status: 401,
                });
            }
            other => other?,
        };

        let profile = envelope
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .and_then(|result| result.asset_profile)
            .ok_or_else(|| DataError::MissingField("quoteSummary.assetProfile".to_string()))?;

        Ok(CompanyProfile {
            sector: profile.sector,
            industry: profile.industry,
            officers: profile.company_officers.map(|officers| {
                officers
                    .into_iter()
                    .map(|o| Officer {
                        name: o.name,
                        title: o.title,
                    })
                    .collect()
            }),
        })
    }

    fn balance_sheet(&self, ticker: &str) -> Result<BalanceSheet, DataError> {
        let url = format!("{}/{}", self.timeseries_url, ticker);
        let types: Vec<&str> = BALANCE_SHEET_SERIES.iter().map(|(t, _)| *t).collect();
        let body: Value = self.get_json(
            &url,
            &[
                ("symbol", ticker.to_string()),
                ("type", types.join(",")),
                ("period1", SERIES_PERIOD_START.to_string()),
                ("period2", Utc::now().timestamp().to_string()),
            ],
        )?;

        parse_timeseries(&body)
    }

    fn news(&self, ticker: &str) -> Result<Vec<NewsItem>, DataError> {
        let response = self.search_raw(ticker, 0, 10)?;
        Ok(response
            .news
            .into_iter()
            .filter_map(|n| {
                Some(NewsItem {
                    title: n.title?,
                    publisher: n.publisher,
                    url: n.link,
                    published_at: n
                        .provider_publish_time
                        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
                })
            })
            .collect())
    }
}

/// Decode a fundamentals time series payload into a balance sheet.
fn parse_timeseries(body: &Value) -> Result<BalanceSheet, DataError> {
    let results = body
        .pointer("/timeseries/result")
        .and_then(Value::as_array)
        .ok_or_else(|| DataError::MissingField("timeseries.result".to_string()))?;

    let mut observations: HashMap<String, Vec<(NaiveDate, f64)>> = HashMap::new();

    for series in results {
        for (series_type, label) in BALANCE_SHEET_SERIES {
            let Some(points) = series.get(*series_type).and_then(Value::as_array) else {
                continue;
            };
            let parsed: Vec<(NaiveDate, f64)> = points
                .iter()
                .filter_map(|point| {
                    let date = point.get("asOfDate")?.as_str()?;
                    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
                    let value = point.pointer("/reportedValue/raw")?.as_f64()?;
                    Some((date, value))
                })
                .collect();
            if !parsed.is_empty() {
                observations
                    .entry(label.to_string())
                    .or_default()
                    .extend(parsed);
            }
        }
    }

    Ok(BalanceSheet::from_observations(observations))
}
