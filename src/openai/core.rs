use std::time::Duration;

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::providers::ProviderConfig;

/// Used when a provider answers successfully but without any text in
/// the first choice.
pub const EMPTY_COMPLETION_PLACEHOLDER: &str = "Response processed.";

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Sends a chat completion request to an OpenAI compatible endpoint.
///
/// Any non-success status is returned as an error along with
/// transport failures, timeouts, and bodies that aren't JSON so the
/// caller can treat them all the same way.
pub async fn completion(
    client: &reqwest::Client,
    provider: &ProviderConfig,
    messages: &[Message],
    timeout: Duration,
) -> Result<Value, Error> {
    let mut payload = json!({
        "messages": messages,
        "max_tokens": provider.max_tokens,
        "temperature": provider.temperature,
    });
    if let Some(model) = &provider.model {
        payload["model"] = json!(model);
    }
    let response = client
        .post(&provider.endpoint)
        .bearer_auth(&provider.api_key)
        .header("Content-Type", "application/json")
        .timeout(timeout)
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response)
}

/// Text of the first choice, or a placeholder when the payload is
/// missing it.
pub fn completion_text(resp: &Value) -> String {
    resp["choices"][0]["message"]["content"]
        .as_str()
        .filter(|s| !s.is_empty())
        .unwrap_or(EMPTY_COMPLETION_PLACEHOLDER)
        .to_string()
}
