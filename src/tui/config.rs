//! Terminal client configuration read from the environment

use crate::llm::parse_or;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_RELAY_URL: &str = "http://localhost:5001";
const DEFAULT_TIMEOUT_SECS: u64 = 330;
const FALLBACK_USER_NAME: &str = "guest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub relay_url: String,
    /// Kept above the relay's provider timeout so the relay reports first
    pub timeout: Duration,
    /// Shown in the header in place of a signed-in account
    pub user_name: String,
    /// Log destination; `None` disables logging since the UI owns the terminal
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_name: FALLBACK_USER_NAME.to_string(),
            log_file: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            relay_url: non_blank("CHAT_RELAY_URL").unwrap_or(defaults.relay_url),
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "CHAT_RELAY_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            user_name: non_blank("CHAT_USER_NAME")
                .or_else(|| non_blank("USER"))
                .unwrap_or(defaults.user_name),
            log_file: non_blank("CHAT_LOG_FILE").map(PathBuf::from),
        }
    }
}
