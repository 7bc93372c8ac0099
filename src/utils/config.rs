//! Configuration loading and management.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::llm::{LLMClient, LLMProvider};
use crate::sentiment::{LexiconClassifier, LlmClassifier, SentimentClassifier};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sentiment classifier configuration.
    pub classifier: ClassifierConfig,
    /// Data source configuration.
    pub data: DataConfig,
}

/// Which sentiment backend to use and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Backend type (lexicon, llm).
    pub backend: String,
    /// LLM settings, used when `backend = "llm"`.
    pub llm: LLMConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: "lexicon".to_string(),
            llm: LLMConfig::default(),
        }
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    /// Provider type (openai, anthropic, azure, local).
    pub provider: String,
    /// Model name.
    pub model: String,
    /// API key (optional, can be from env).
    pub api_key: Option<String>,
    /// API base URL (for local providers).
    pub base_url: Option<String>,
    /// Azure resource endpoint.
    pub endpoint: Option<String>,
    /// Azure deployment name.
    pub deployment: Option<String>,
    /// Temperature for generation.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: "local".to_string(),
            model: "llama3".to_string(),
            api_key: None,
            base_url: Some("http://localhost:11434".to_string()),
            endpoint: None,
            deployment: None,
            temperature: 0.0,
            max_tokens: 1500,
            timeout_secs: 60,
        }
    }
}

/// Data source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Timeout for search, fundamentals and feed requests.
    pub timeout_secs: u64,
    /// User agent sent to the data providers.
    pub user_agent: String,
    /// Feed entries considered per query.
    pub feed_max_entries: usize,
    /// Headlines sent to the classifier per analysis.
    pub max_scored_headlines: usize,
    /// Yahoo Finance search endpoint.
    pub search_url: String,
    /// Yahoo Finance quote summary endpoint (ticker is appended).
    pub quote_summary_url: String,
    /// Yahoo Finance fundamentals time series endpoint (ticker is appended).
    pub timeseries_url: String,
    /// Page that sets the Yahoo Finance session cookie.
    pub cookie_url: String,
    /// Yahoo Finance crumb endpoint, paired with the session cookie.
    pub crumb_url: String,
    /// Google News RSS search endpoint.
    pub news_feed_url: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: "Mozilla/5.0".to_string(),
            feed_max_entries: 30,
            max_scored_headlines: 20,
            search_url: "https://query2.finance.yahoo.com/v1/finance/search".to_string(),
            quote_summary_url: "https://query2.finance.yahoo.com/v10/finance/quoteSummary"
                .to_string(),
            timeseries_url:
                "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries"
                    .to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            crumb_url: "https://query2.finance.yahoo.com/v1/test/getcrumb".to_string(),
            news_feed_url: "https://news.google.com/rss/search".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Create a sample configuration file.
    pub fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        Config::default().save_to_file(path)
    }

    /// Get API key from config or, for hosted providers, the environment.
    pub fn get_api_key(&self) -> Option<String> {
        self.classifier.llm.api_key.clone().or_else(|| {
            match self.classifier.llm.provider.as_str() {
                "openai" => std::env::var("OPENAI_API_KEY").ok(),
                "anthropic" => std::env::var("ANTHROPIC_API_KEY").ok(),
                "azure" => std::env::var("AZURE_OPENAI_API_KEY").ok(),
                _ => None,
            }
        })
    }

    /// Provider described by the `[classifier.llm]` section.
    pub fn llm_provider(&self) -> Result<LLMProvider> {
        let llm = &self.classifier.llm;
        let model = llm.model.clone();

        let provider = match llm.provider.as_str() {
            "openai" => LLMProvider::OpenAI {
                model,
                api_key: self.get_api_key().context("API key required for OpenAI")?,
            },
            "anthropic" => LLMProvider::Anthropic {
                model,
                api_key: self.get_api_key().context("API key required for Anthropic")?,
            },
            "azure" => LLMProvider::AzureOpenAI {
                model,
                api_key: self.get_api_key().context("API key required for Azure OpenAI")?,
                endpoint: llm.endpoint.clone().context("endpoint required for Azure OpenAI")?,
                deployment: llm
                    .deployment
                    .clone()
                    .context("deployment required for Azure OpenAI")?,
            },
            "local" => LLMProvider::Local {
                model,
                base_url: llm
                    .base_url
                    .clone()
                    .unwrap_or_else(|| "http://localhost:11434".to_string()),
            },
            other => bail!("Unknown LLM provider: {}", other),
        };

        Ok(provider)
    }

    /// Build the configured sentiment classifier.
    pub fn build_classifier(&self) -> Result<Box<dyn SentimentClassifier>> {
        match self.classifier.backend.as_str() {
            "lexicon" => Ok(Box::new(LexiconClassifier::new())),
            "llm" => {
                let llm = &self.classifier.llm;
                let client = LLMClient::new(self.llm_provider()?)
                    .with_temperature(llm.temperature)
                    .with_max_tokens(llm.max_tokens)
                    .with_timeout(Duration::from_secs(llm.timeout_secs));
                Ok(Box::new(LlmClassifier::new(client)))
            }
            other => bail!("Unknown classifier backend: {}", other),
        }
    }
}

/// Load configuration from file or create default.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        Config::from_file(path)
    } else {
        Ok(Config::default())
    }
}
