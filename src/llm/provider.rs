//! LLM provider configuration.

use serde::{Deserialize, Serialize};

/// Supported LLM providers for headline classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LLMProvider {
    /// OpenAI chat completions
    OpenAI { model: String, api_key: String },
    /// Anthropic messages API
    Anthropic { model: String, api_key: String },
    /// Local/self-hosted models (Ollama, vLLM, etc.)
    Local { model: String, base_url: String },
    /// Azure OpenAI Service
    AzureOpenAI {
        model: String,
        api_key: String,
        endpoint: String,
        deployment: String,
    },
}

impl LLMProvider {
    /// Create a local Ollama provider.
    pub fn ollama(model: String) -> Self {
        LLMProvider::Local {
            model,
            base_url: "http://localhost:11434".to_string(),
        }
    }

    pub fn model_name(&self) -> &str {
        match self {
            LLMProvider::OpenAI { model, .. }
            | LLMProvider::Anthropic { model, .. }
            | LLMProvider::Local { model, .. }
            | LLMProvider::AzureOpenAI { model, .. } => model,
        }
    }

    pub fn provider_name(&self) -> &str {
        match self {
            LLMProvider::OpenAI { .. } => "OpenAI",
            LLMProvider::Anthropic { .. } => "Anthropic",
            LLMProvider::Local { .. } => "Local",
            LLMProvider::AzureOpenAI { .. } => "AzureOpenAI",
        }
    }

    /// Chat endpoint for this provider.
    pub fn endpoint_url(&self) -> String {
        match self {
            LLMProvider::OpenAI { .. } => "https://api.openai.com/v1/chat/completions".to_string(),
            LLMProvider::Anthropic { .. } => "https://api.anthropic.com/v1/messages".to_string(),
            LLMProvider::Local { base_url, .. } => {
                format!("{}/api/chat", base_url.trim_end_matches('/'))
            }
            LLMProvider::AzureOpenAI {
                endpoint,
                deployment,
                ..
            } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version=2024-02-15-preview",
                endpoint.trim_end_matches('/'),
                deployment
            ),
        }
    }
}

impl Default for LLMProvider {
    fn default() -> Self {
        LLMProvider::ollama("llama3".to_string())
    }
}
