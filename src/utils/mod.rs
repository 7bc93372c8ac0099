//! Utility modules.

mod config;

pub use config::{load_config, ClassifierConfig, Config, DataConfig, LLMConfig};
