//! Error types shared by the data adapters and the sentiment classifiers.

use thiserror::Error;

/// Failure while fetching or decoding data from an external source.
#[derive(Error, Debug)]
pub enum DataError {
    /// Transport-level failure, including timeouts
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote answered with a non-success status
    #[error("HTTP {status} from {source_name}")]
    Status { source_name: String, status: u16 },

    /// Body could not be decoded
    #[error("Failed to parse data: {0}")]
    Parse(String),

    /// Response decoded but a required field was absent
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Response decoded but carried nothing usable
    #[error("No results for {0}")]
    Empty(String),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

impl From<rss::Error> for DataError {
    fn from(err: rss::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

/// Failure of the batch sentiment classification capability.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Backend request failed
    #[error("Classifier request failed: {0}")]
    Request(String),

    /// Backend answered but the payload could not be understood
    #[error("Invalid classifier response: {0}")]
    InvalidResponse(String),

    /// Backend returned a label outside {positive, neutral, negative}
    #[error("Unknown sentiment label: {0}")]
    UnknownLabel(String),

    /// One result per input text is required
    #[error("Expected {expected} classifications, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

impl From<reqwest::Error> for ClassifierError {
    fn from(err: reqwest::Error) -> Self {
        ClassifierError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        ClassifierError::InvalidResponse(err.to_string())
    }
}
