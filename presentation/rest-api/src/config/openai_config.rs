use std::time::Duration;

use openai::chat_model::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use openai::client::DEFAULT_BASE_URL;

use super::env::{ConfigError, Lookup, ProcessEnv, non_blank, parse_or, required};

/// Configuration for OpenAI API access.
///
/// Environment variables:
/// - OPENAI_API_KEY: API key (required)
/// - OPENAI_MODEL: Chat model (default: "gpt-3.5-turbo-16k")
/// - OPENAI_BASE_URL: API root (default: "https://api.openai.com/v1")
/// - OPENAI_TEMPERATURE: Sampling temperature (default: 0.7)
/// - OPENAI_TIMEOUT_SECS: Upper bound for one streamed completion (default: 300)
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&ProcessEnv)
    }

    pub fn from_lookup(lookup: &dyn Lookup) -> Result<Self, ConfigError> {
        let temperature: f32 = parse_or(lookup, "OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Invalid {
                name: "OPENAI_TEMPERATURE",
                value: temperature.to_string(),
                reason: "must be between 0 and 2".to_string(),
            });
        }

        Ok(Self {
            api_key: required(lookup, "OPENAI_API_KEY")?,
            model: non_blank(lookup, "OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_blank(lookup, "OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature,
            timeout: Duration::from_secs(parse_or(lookup, "OPENAI_TIMEOUT_SECS", 300)?),
        })
    }
}
