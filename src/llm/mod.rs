//! LLM client module for interacting with language model APIs.

mod client;
mod provider;

pub use client::{LLMClient, Message};
pub use provider::LLMProvider;
