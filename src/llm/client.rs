//! Blocking chat client for the supported LLM providers.

use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::provider::LLMProvider;
use crate::error::ClassifierError;

/// Message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// OpenAI-compatible request format, also used by Azure.
#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    messages: Vec<&'a Message>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: MessageContent,
}

/// Client for interacting with LLM APIs.
pub struct LLMClient {
    provider: LLMProvider,
    client: Client,
    temperature: f32,
    max_tokens: u32,
}

impl LLMClient {
    pub fn new(provider: LLMProvider) -> Self {
        Self {
            provider,
            client: Client::new(),
            // Classification wants stable labels
            temperature: 0.0,
            max_tokens: 1500,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        self
    }

    /// Send a completion request and return the raw text answer.
    pub fn complete(&self, messages: &[Message]) -> Result<String, ClassifierError> {
        let url = self.provider.endpoint_url();
        debug!(
            "Sending {} messages to {} ({})",
            messages.len(),
            self.provider.provider_name(),
            self.provider.model_name()
        );

        match &self.provider {
            LLMProvider::OpenAI { model, api_key } => {
                let request = OpenAIRequest {
                    model,
                    messages,
                    temperature: self.temperature,
                    max_tokens: self.max_tokens,
                };
                let builder = self.client.post(&url).bearer_auth(api_key).json(&request);
                let data: OpenAIResponse = send(builder, "OpenAI")?;
                first_choice(data, "OpenAI")
            }
            LLMProvider::AzureOpenAI { model, api_key, .. } => {
                let request = OpenAIRequest {
                    model,
                    messages,
                    temperature: self.temperature,
                    max_tokens: self.max_tokens,
                };
                let builder = self
                    .client
                    .post(&url)
                    .header("api-key", api_key)
                    .json(&request);
                let data: OpenAIResponse = send(builder, "Azure OpenAI")?;
                first_choice(data, "Azure OpenAI")
            }
            LLMProvider::Anthropic { model, api_key } => {
                let request = AnthropicRequest {
                    model,
                    messages: messages.iter().filter(|m| m.role != "system").collect(),
                    max_tokens: self.max_tokens,
                    temperature: self.temperature,
                    system: messages
                        .iter()
                        .find(|m| m.role == "system")
                        .map(|m| m.content.as_str()),
                };
                let builder = self
                    .client
                    .post(&url)
                    .header("x-api-key", api_key)
                    .header("anthropic-version", "2023-06-01")
                    .json(&request);
                let data: AnthropicResponse = send(builder, "Anthropic")?;
                data.content
                    .into_iter()
                    .next()
                    .map(|c| c.text)
                    .ok_or_else(|| ClassifierError::InvalidResponse("empty Anthropic reply".into()))
            }
            LLMProvider::Local { model, .. } => {
                let request = OllamaRequest {
                    model,
                    messages,
                    stream: false,
                };
                let data: OllamaResponse = send(self.client.post(&url).json(&request), "local LLM")?;
                Ok(data.message.content)
            }
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }
}

fn send<T: for<'de> Deserialize<'de>>(
    builder: RequestBuilder,
    label: &str,
) -> Result<T, ClassifierError> {
    let response = builder.send()?;
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().unwrap_or_default();
        return Err(ClassifierError::Request(format!(
            "{} API error {}: {}",
            label, status, error_text
        )));
    }
    let body = response.text()?;
    Ok(serde_json::from_str(&body)?)
}

fn first_choice(data: OpenAIResponse, label: &str) -> Result<String, ClassifierError> {
    data.choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| ClassifierError::InvalidResponse(format!("empty {} reply", label)))
}
