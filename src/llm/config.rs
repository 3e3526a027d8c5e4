//! Provider configuration read from the environment

use super::SamplingSettings;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the completion provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `None` when `OPENAI_API_KEY` is unset or empty
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub sampling: SamplingSettings,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            sampling: SamplingSettings::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, so tests never mutate the
    /// process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
            base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: lookup("CHAT_MODEL").unwrap_or(defaults.model),
            sampling: SamplingSettings {
                max_tokens: parse_or(&lookup, "CHAT_MAX_TOKENS", defaults.sampling.max_tokens),
                temperature: parse_or(&lookup, "CHAT_TEMPERATURE", defaults.sampling.temperature),
            },
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "CHAT_PROVIDER_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        }
    }
}

/// Parse a numeric variable, keeping the default (with a warning) when it is
/// malformed
pub(crate) fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "Ignoring unparseable setting");
            default
        }),
    }
}
