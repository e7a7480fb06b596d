use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::providers::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, ProviderConfig, configured_providers,
};

pub const DEFAULT_PERSONA: &str = "network-gpt";
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 100_000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub providers: Vec<ProviderConfig>,
    pub persona: String,
    pub persona_file: Option<String>,
    pub static_dir: String,
    pub max_message_length: usize,
    pub provider_timeout: Duration,
    pub request_deadline: Duration,
}

impl AppConfig {
    /// Reads configuration from an arbitrary variable lookup so it
    /// can be exercised without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_tokens =
            parse_var(&lookup, "NETWORK_GPT_MAX_TOKENS").unwrap_or(DEFAULT_MAX_TOKENS);
        let temperature =
            parse_var(&lookup, "NETWORK_GPT_TEMPERATURE").unwrap_or(DEFAULT_TEMPERATURE);
        let max_message_length = parse_var(&lookup, "NETWORK_GPT_MAX_MESSAGE_LENGTH")
            .unwrap_or(DEFAULT_MAX_MESSAGE_LENGTH);
        let provider_timeout = Duration::from_secs(
            parse_var(&lookup, "NETWORK_GPT_PROVIDER_TIMEOUT_SECS").unwrap_or(10),
        );
        let request_deadline = Duration::from_secs(
            parse_var(&lookup, "NETWORK_GPT_REQUEST_DEADLINE_SECS").unwrap_or(30),
        );
        let persona = lookup("NETWORK_GPT_PERSONA")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PERSONA.to_string());
        let persona_file = lookup("NETWORK_GPT_PERSONA_FILE").filter(|v| !v.trim().is_empty());
        let static_dir =
            lookup("NETWORK_GPT_STATIC_DIR").unwrap_or_else(|| "./public".to_string());

        Self {
            providers: configured_providers(&lookup, max_tokens, temperature),
            persona,
            persona_file,
            static_dir,
            max_message_length,
            provider_timeout,
            request_deadline,
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|v| v.trim().parse().ok())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }
}
