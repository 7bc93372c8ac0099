//! Integration tests for Dark Risk Radar

use approx::assert_abs_diff_eq;
use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

use dark_risk_radar::data::{
    BalanceSheet, CompanyProfile, CompanySearch, FeedEntry, FeedSearch, FundamentalsSource,
    NewsItem, Officer, TickerCandidate, CURRENT_ASSETS, CURRENT_LIABILITIES, TOTAL_ASSETS,
    TOTAL_LIABILITIES_NET_MINORITY_INTEREST,
};
use dark_risk_radar::error::{ClassifierError, DataError};
use dark_risk_radar::risk::{AggregateError, StatusBand};
use dark_risk_radar::sentiment::{Classification, LexiconClassifier, SentimentClassifier};
use dark_risk_radar::utils::DataConfig;
use dark_risk_radar::{run_session, RiskRadar};

// In-memory capabilities

struct Directory(Option<&'static str>);

impl CompanySearch for Directory {
    fn search(&self, query: &str) -> Result<Vec<TickerCandidate>, DataError> {
        match self.0 {
            Some(symbol) => Ok(vec![TickerCandidate {
                symbol: symbol.to_string(),
                name: Some(query.to_string()),
                exchange: Some("NYQ".to_string()),
            }]),
            None => Err(DataError::Empty(query.to_string())),
        }
    }
}

#[derive(Default)]
struct Fundamentals {
    profile: Option<CompanyProfile>,
    sheet: Option<BalanceSheet>,
    news: Option<Vec<NewsItem>>,
}

fn unavailable(part: &str) -> DataError {
    DataError::Status {
        source_name: part.to_string(),
        status: 503,
    }
}

impl FundamentalsSource for Fundamentals {
    fn profile(&self, _ticker: &str) -> Result<CompanyProfile, DataError> {
        self.profile.clone().ok_or_else(|| unavailable("profile"))
    }

    fn balance_sheet(&self, _ticker: &str) -> Result<BalanceSheet, DataError> {
        self.sheet.clone().ok_or_else(|| unavailable("balance sheet"))
    }

    fn news(&self, _ticker: &str) -> Result<Vec<NewsItem>, DataError> {
        self.news.clone().ok_or_else(|| unavailable("news"))
    }
}

struct Feed(Vec<String>);

impl Feed {
    fn of(titles: &[&str]) -> Self {
        Feed(titles.iter().map(|t| t.to_string()).collect())
    }
}

impl FeedSearch for Feed {
    fn search(&self, _query: &str) -> Result<Vec<FeedEntry>, DataError> {
        Ok(self
            .0
            .iter()
            .map(|title| FeedEntry {
                title: title.clone(),
                link: None,
            })
            .collect())
    }
}

struct DownFeed;

impl FeedSearch for DownFeed {
    fn search(&self, _query: &str) -> Result<Vec<FeedEntry>, DataError> {
        Err(unavailable("feed"))
    }
}

/// Keyword-scripted classifier that records the size of every batch.
#[derive(Default)]
struct Scripted {
    batches: Rc<RefCell<Vec<usize>>>,
}

impl SentimentClassifier for Scripted {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn classify_batch(&self, texts: &[String]) -> Result<Vec<Classification>, ClassifierError> {
        self.batches.borrow_mut().push(texts.len());
        Ok(texts
            .iter()
            .map(|t| {
                let t = t.to_lowercase();
                if t.contains("fraud") {
                    Classification::negative(0.9)
                } else if t.contains("sued") {
                    Classification::negative(0.5)
                } else if t.contains("beats") {
                    Classification::positive(0.8)
                } else {
                    Classification::neutral(0.6)
                }
            })
            .collect())
    }
}

struct Broken;

impl SentimentClassifier for Broken {
    fn name(&self) -> &str {
        "Broken"
    }

    fn classify_batch(&self, _texts: &[String]) -> Result<Vec<Classification>, ClassifierError> {
        Err(ClassifierError::Request("model offline".to_string()))
    }
}

// Fixtures

fn listed_fundamentals() -> Fundamentals {
    let profile = CompanyProfile::new("Real Estate", "REIT - Office").with_officers(vec![
        Officer::titled("Chief Executive Officer (CEO)"),
        Officer::titled("CFO & Treasurer"),
    ]);
    let sheet = BalanceSheet::new()
        .with_item(TOTAL_ASSETS, vec![Some(100.0)])
        .with_item(TOTAL_LIABILITIES_NET_MINORITY_INTEREST, vec![Some(60.0)])
        .with_item(CURRENT_ASSETS, vec![Some(120.0)])
        .with_item(CURRENT_LIABILITIES, vec![Some(100.0)]);
    let news = vec![
        NewsItem::new("Acme Holdings faces fraud probe"),
        NewsItem::new("ACME HOLDINGS beats estimates"),
        NewsItem::new("Sector roundup for the week"),
    ];

    Fundamentals {
        profile: Some(profile),
        sheet: Some(sheet),
        news: Some(news),
    }
}

fn listed_radar() -> RiskRadar {
    RiskRadar::new(
        Box::new(Directory(Some("ACME"))),
        Box::new(listed_fundamentals()),
        Box::new(Feed::of(&[
            "Acme Holdings faces fraud probe",
            "Weather turns cold across the region",
            "Acme Holdings opens new office",
        ])),
        Box::new(Scripted::default()),
    )
}

mod pipeline {
    use super::*;

    #[test]
    fn test_listed_company_uses_all_four_signals() {
        let report = listed_radar().analyse("Acme Holdings").unwrap();

        assert_eq!(report.ticker.as_deref(), Some("ACME"));
        assert_eq!(report.sector.label, "Real Estate - REIT - Office");
        assert_abs_diff_eq!(report.sector.modifier, 1.15);

        // solvency 60, current ratio 1.2 -> liquidity 30
        assert_abs_diff_eq!(report.signals.fin.unwrap(), 45.0, epsilon = 1e-9);
        // only coo, president, counsel and cto are missing
        assert_abs_diff_eq!(report.signals.exec.unwrap(), 35.0, epsilon = 1e-9);
        // fraud at 0.9 confidence
        assert_abs_diff_eq!(report.signals.legal.unwrap(), 63.0, epsilon = 1e-9);
        // (90 - 40 + 20) / 3
        assert_abs_diff_eq!(report.signals.news.unwrap(), 70.0 / 3.0, epsilon = 1e-9);

        let base = 0.40 * 45.0 + 0.25 * 63.0 + 0.20 * 35.0 + 0.15 * (70.0 / 3.0);
        assert_abs_diff_eq!(report.aggregate.base, base, epsilon = 1e-9);
        assert_abs_diff_eq!(report.final_score(), base * 1.15, epsilon = 1e-9);
        assert_eq!(report.status(), StatusBand::Caution);
    }

    #[test]
    fn test_headlines_are_deduplicated_across_sources() {
        let report = listed_radar().analyse("Acme Holdings").unwrap();
        // the fraud headline appears in both sources; irrelevant titles are dropped
        assert_eq!(report.headline_count, 3);
    }

    #[test]
    fn test_private_company_relies_on_headlines_only() {
        let radar = RiskRadar::new(
            Box::new(Directory(None)),
            Box::new(Fundamentals::default()),
            Box::new(Feed::of(&["Quiet Startup sued by former staff"])),
            Box::new(Scripted::default()),
        );

        let report = radar.analyse("Quiet Startup").unwrap();

        assert_eq!(report.ticker, None);
        assert_eq!(report.sector.label, "Unknown / Private");
        assert_eq!(report.signals.fin, None);
        assert_eq!(report.signals.exec, None);
        // legal 10 and news 50 renormalized over 0.40
        assert_abs_diff_eq!(report.final_score(), 25.0, epsilon = 1e-9);
        assert_eq!(report.status(), StatusBand::Stable);
    }

    #[test]
    fn test_failed_fundamentals_degrade_instead_of_failing() {
        let radar = RiskRadar::new(
            Box::new(Directory(Some("GONE"))),
            Box::new(Fundamentals::default()),
            Box::new(DownFeed),
            Box::new(Scripted::default()),
        );

        let report = radar.analyse("Gone Corp").unwrap();

        assert_eq!(report.sector.label, "Unknown");
        assert_eq!(report.signals.fin, None);
        assert_eq!(report.signals.exec, Some(50.0));
        assert_eq!(report.signals.news, Some(0.0));
        assert_eq!(report.signals.legal, Some(0.0));
        assert_abs_diff_eq!(report.final_score(), 50.0 * 0.20 / 0.60, epsilon = 1e-9);
    }

    #[test]
    fn test_nothing_available_is_no_data() {
        let radar = RiskRadar::new(
            Box::new(Directory(None)),
            Box::new(Fundamentals::default()),
            Box::new(Feed::of(&["Ghost Inc under investigation"])),
            Box::new(Broken),
        );

        assert_eq!(radar.analyse("Ghost Inc").unwrap_err(), AggregateError::NoData);
    }

    #[test]
    fn test_classifier_receives_at_most_twenty_headlines() {
        let titles: Vec<String> = (0..40).map(|i| format!("Busy Co update {}", i)).collect();
        let scripted = Scripted::default();
        let batches = Rc::clone(&scripted.batches);

        let radar = RiskRadar::new(
            Box::new(Directory(None)),
            Box::new(Fundamentals::default()),
            Box::new(Feed(titles)),
            Box::new(scripted),
        );

        let report = radar.analyse("Busy Co").unwrap();

        // the feed is cut at 30 entries before scoring
        assert_eq!(report.headline_count, 30);
        assert_eq!(*batches.borrow(), vec![20]);
    }

    #[test]
    fn test_limits_follow_data_config() {
        let titles: Vec<String> = (0..10).map(|i| format!("Busy Co update {}", i)).collect();
        let scripted = Scripted::default();
        let batches = Rc::clone(&scripted.batches);
        let config = DataConfig {
            feed_max_entries: 5,
            max_scored_headlines: 2,
            ..DataConfig::default()
        };

        let radar = RiskRadar::new(
            Box::new(Directory(None)),
            Box::new(Fundamentals::default()),
            Box::new(Feed(titles)),
            Box::new(scripted),
        )
        .with_limits(&config);

        let report = radar.analyse("Busy Co").unwrap();
        assert_eq!(report.headline_count, 5);
        assert_eq!(*batches.borrow(), vec![2]);
    }

    #[test]
    fn test_repeated_analysis_is_stable() {
        let radar = listed_radar();
        let first = radar.analyse("Acme Holdings").unwrap();
        let second = radar.analyse("Acme Holdings").unwrap();

        assert_eq!(first.signals, second.signals);
        assert_eq!(first.final_score(), second.final_score());
    }

    #[test]
    fn test_lexicon_backend_end_to_end() {
        let radar = RiskRadar::new(
            Box::new(Directory(None)),
            Box::new(Fundamentals::default()),
            Box::new(Feed::of(&["Lumen Labs hit with fraud lawsuit as losses mount"])),
            Box::new(LexiconClassifier::new()),
        );

        let report = radar.analyse("Lumen Labs").unwrap();
        assert!(report.signals.legal.unwrap() > 0.0);
        assert!(report.signals.news.unwrap() > 0.0);
    }
}

mod session {
    use super::*;

    fn run(input: &str, radar: &RiskRadar) -> String {
        let mut out = Vec::new();
        run_session(radar, Cursor::new(input.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_session_prints_report_then_exits() {
        let out = run("Acme Holdings\nquit\n", &listed_radar());

        assert!(out.starts_with("🚀 DarkRiskRadar Terminal Activated."));
        assert!(out.contains("Type 'exit' or 'quit' at any time to stop the program."));
        assert!(out.contains("Enter company to analyse: "));
        assert!(out.contains("💡 Initializing Probabilistic AI Engine (Scripted) for Acme Holdings..."));
        assert!(out.contains("--- 🛰️ DARK RISK RADAR: Acme Holdings ---"));
        assert!(out.contains("🏢 Sector Profile: Real Estate - REIT - Office"));
        assert!(out.contains("⚖️ Sector Modifier: 1.15x"));
        assert!(out.contains(" -> FIN   : 45.00"));
        assert!(out.contains(" -> EXEC  : 35.00"));
        assert!(out.contains("🎯 TRUE GRANULAR RISK: "));
        assert!(out.contains("CAUTION"));
        assert!(out.contains(&"=".repeat(50)));
        assert!(out.trim_end().ends_with("🛑 Shutting down DarkRiskRadar. Goodbye!"));
    }

    #[test]
    fn test_no_data_prints_critical_error_and_continues() {
        let radar = RiskRadar::new(
            Box::new(Directory(None)),
            Box::new(Fundamentals::default()),
            Box::new(Feed::of(&["Ghost Inc under investigation"])),
            Box::new(Broken),
        );

        let out = run("Ghost Inc\nGhost Inc\nexit\n", &radar);

        assert_eq!(out.matches("❌ Critical Error: No data could be retrieved.").count(), 2);
        assert!(!out.contains("TRUE GRANULAR RISK"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let radar = listed_radar();
        let mut input = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(b"Acme Holdings\nquit\n");

        let mut out = Vec::new();
        run_session(&radar, Cursor::new(input), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("--- 🛰️ DARK RISK RADAR: Acme Holdings ---"));
        assert_eq!(out.matches("DARK RISK RADAR:").count(), 1);
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_end_of_input_and_empty_line_exit() {
        let radar = listed_radar();

        let eof = run("", &radar);
        assert!(eof.contains("Goodbye!"));
        assert!(!eof.contains("DARK RISK RADAR"));

        let blank = run("\nAcme Holdings\n", &radar);
        assert!(!blank.contains("DARK RISK RADAR"));
    }
}
