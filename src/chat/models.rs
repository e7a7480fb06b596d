//! Request and reply types for a single chat turn.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Sent to the providers in place of the text when only media was
/// attached.
pub const MEDIA_ONLY_PLACEHOLDER: &str = "[Media only - analyzing attached files...]";

/// Client input problems. The display text is returned to the caller
/// as-is so keep it free of internal detail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid request format")]
    InvalidFormat,

    #[error("Invalid chat history format")]
    InvalidHistory,

    #[error("Invalid media format")]
    InvalidMedia,

    #[error("Message or media is required")]
    MissingContent,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaAttachment {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl MediaAttachment {
    /// Only metadata is used so any array item is accepted. Fields
    /// that are missing or not strings become empty.
    fn from_value(item: &Value) -> Self {
        let field = |key: &str| {
            item.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            name: field("name"),
            kind: field("type"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    /// Trimmed and truncated message text, possibly empty when media
    /// is attached.
    pub message: String,
    pub chat_history: Vec<Value>,
    pub media: Vec<MediaAttachment>,
}

impl ChatRequest {
    /// Validates a raw JSON body, enforcing that there is either text
    /// or media and capping the text at `max_chars` characters.
    pub fn parse(body: &[u8], max_chars: usize) -> Result<Self, RequestError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| RequestError::InvalidFormat)?;
        let Value::Object(mut fields) = value else {
            return Err(RequestError::InvalidFormat);
        };

        let chat_history = match fields.remove("chatHistory") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(RequestError::InvalidHistory),
        };

        let media = match fields.remove("media") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(MediaAttachment::from_value).collect(),
            Some(_) => return Err(RequestError::InvalidMedia),
        };

        // Anything other than a string counts as no message at all
        let message = match fields.get("message") {
            Some(Value::String(s)) => s.trim().chars().take(max_chars).collect::<String>(),
            _ => String::new(),
        };

        if message.is_empty() && media.is_empty() {
            return Err(RequestError::MissingContent);
        }

        Ok(Self {
            message,
            chat_history,
            media,
        })
    }

    pub fn new(message: &str) -> Self {
        Self {
            message: message.trim().to_string(),
            chat_history: Vec::new(),
            media: Vec::new(),
        }
    }

    pub fn with_media(mut self, media: Vec<MediaAttachment>) -> Self {
        self.media = media;
        self
    }

    /// Text sent to the providers
    pub fn user_message(&self) -> &str {
        if self.message.is_empty() {
            MEDIA_ONLY_PLACEHOLDER
        } else {
            &self.message
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
    Offline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hinglish,
    English,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub provider: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    pub timestamp: String,
}

impl ChatReply {
    pub fn online(provider: &str, response: &str) -> Self {
        Self {
            response: response.to_string(),
            provider: provider.to_string(),
            status: Status::Online,
            language: None,
            timestamp: timestamp(),
        }
    }

    pub fn offline(provider: &str, response: &str, language: Language) -> Self {
        Self {
            response: response.to_string(),
            provider: provider.to_string(),
            status: Status::Offline,
            language: Some(language),
            timestamp: timestamp(),
        }
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g.
/// `2025-01-28T09:15:00.000Z`
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
