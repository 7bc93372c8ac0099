//! LLM-backed headline classifier.

use serde::Deserialize;
use tracing::{debug, info};

use super::{Classification, SentimentClassifier, SentimentLabel};
use crate::error::ClassifierError;
use crate::llm::{LLMClient, Message};

const SYSTEM_PROMPT: &str = "You are a financial news sentiment classifier. \
Label each headline as positive, neutral or negative from an investor's point of view. \
Always respond with valid JSON only.";

/// Prompt template; `{headlines}` is replaced by a numbered list.
const CLASSIFY_PROMPT: &str = r#"Classify the sentiment of each numbered headline.

{headlines}

Respond ONLY with a JSON array containing exactly one object per headline, in the same order:
[
  {"label": "negative", "confidence": 0.93},
  {"label": "neutral", "confidence": 0.71}
]
"label" must be one of "positive", "neutral", "negative" and "confidence" a number between 0 and 1."#;

#[derive(Debug, Deserialize)]
struct RawClassification {
    label: String,
    confidence: Option<f64>,
}

/// Classifier that prompts an LLM for a JSON label array.
pub struct LlmClassifier {
    client: LLMClient,
    name: String,
}

impl LlmClassifier {
    pub fn new(client: LLMClient) -> Self {
        let name = format!("{} {}", client.provider_name(), client.model_name());
        Self { client, name }
    }

    fn build_prompt(texts: &[String]) -> String {
        let numbered: Vec<String> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| format!("{}. {}", i + 1, text.replace('\n', " ")))
            .collect();
        CLASSIFY_PROMPT.replace("{headlines}", &numbered.join("\n"))
    }

    /// Parse the model's answer into one classification per input text.
    fn parse_response(
        &self,
        response: &str,
        expected: usize,
    ) -> Result<Vec<Classification>, ClassifierError> {
        let json_str = extract_json_array(response)?;
        let raw: Vec<RawClassification> = serde_json::from_str(json_str)?;

        if raw.len() != expected {
            return Err(ClassifierError::CountMismatch {
                expected,
                actual: raw.len(),
            });
        }

        raw.into_iter()
            .map(|r| {
                let label: SentimentLabel = r.label.parse()?;
                Ok(Classification::new(label, r.confidence.unwrap_or(0.5)))
            })
            .collect()
    }
}

impl SentimentClassifier for LlmClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn classify_batch(&self, texts: &[String]) -> Result<Vec<Classification>, ClassifierError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let messages = vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(&Self::build_prompt(texts)),
        ];

        debug!("Classifying {} headlines with {}", texts.len(), self.name);
        let response = self.client.complete(&messages)?;
        let results = self.parse_response(&response, texts.len())?;
        info!("LLM classified {} headlines", results.len());

        Ok(results)
    }
}

/// Locate a JSON array in potentially mixed content.
fn extract_json_array(text: &str) -> Result<&str, ClassifierError> {
    let text = text.trim();

    if text.starts_with('[') && text.ends_with(']') {
        return Ok(text);
    }

    if let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) {
        if start < end {
            return Ok(&text[start..=end]);
        }
    }

    let preview: String = text.chars().take(100).collect();
    Err(ClassifierError::InvalidResponse(format!(
        "no JSON array in response: {}",
        preview
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LLMProvider;

    fn classifier() -> LlmClassifier {
        LlmClassifier::new(LLMClient::new(LLMProvider::ollama("llama3".to_string())))
    }

    #[test]
    fn test_name_mentions_provider_and_model() {
        assert_eq!(classifier().name(), "Local llama3");
    }

    #[test]
    fn test_prompt_numbers_headlines() {
        let prompt = LlmClassifier::build_prompt(&[
            "Acme sued".to_string(),
            "Acme wins\ncontract".to_string(),
        ]);
        assert!(prompt.contains("1. Acme sued"));
        assert!(prompt.contains("2. Acme wins contract"));
    }

    #[test]
    fn test_extract_json_array_with_text() {
        let response = "Here you go:\n```json\n[{\"label\": \"negative\", \"confidence\": 0.9}]\n```";
        let json = extract_json_array(response).unwrap();
        assert!(json.starts_with('[') && json.ends_with(']'));
    }

    #[test]
    fn test_parse_response() {
        let response = r#"[{"label": "Negative", "confidence": 0.9}, {"label": "neutral"}]"#;
        let results = classifier().parse_response(response, 2).unwrap();

        assert_eq!(results[0], Classification::negative(0.9));
        assert_eq!(results[1].label, SentimentLabel::Neutral);
        assert_eq!(results[1].confidence, 0.5);
    }

    #[test]
    fn test_parse_response_count_mismatch() {
        let response = r#"[{"label": "negative", "confidence": 0.9}]"#;
        assert!(matches!(
            classifier().parse_response(response, 3),
            Err(ClassifierError::CountMismatch { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_parse_response_rejects_unknown_label() {
        let response = r#"[{"label": "bullish", "confidence": 0.9}]"#;
        assert!(matches!(
            classifier().parse_response(response, 1),
            Err(ClassifierError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_empty_batch_skips_request() {
        assert!(classifier().classify_batch(&[]).unwrap().is_empty());
    }
}
