//! Public types for the speech API
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize, Debug)]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: Value,
}

impl SpeakRequest {
    /// Strings are echoed as-is, other JSON values in their JSON form
    /// and a missing or null `text` as an empty string.
    pub fn text(&self) -> String {
        match &self.text {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Speech synthesis happens in the browser. The server only echoes
/// the text back and tells the client to use its own voice.
#[derive(Serialize, Deserialize, Debug)]
pub struct SpeakResponse {
    pub fallback: bool,
    pub text: String,
}

impl SpeakResponse {
    pub fn new(text: &str) -> Self {
        Self {
            fallback: true,
            text: text.to_string(),
        }
    }
}
