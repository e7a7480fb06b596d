use anyhow::{Result, anyhow};

use crate::chat::{ChatRequest, Dispatcher, MediaAttachment};
use crate::core::AppConfig;

/// Parses `name:type`. The type is everything after the last colon so
/// file names may contain colons.
pub fn parse_media(arg: &str) -> Result<MediaAttachment> {
    let (name, kind) = arg
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("Expected name:type, got {}", arg))?;
    if name.is_empty() || kind.is_empty() {
        return Err(anyhow!("Expected name:type, got {}", arg));
    }
    Ok(MediaAttachment {
        name: name.to_string(),
        kind: kind.to_string(),
    })
}

pub async fn run(message: &str, media: Vec<MediaAttachment>) -> Result<()> {
    let config = AppConfig::default();
    let dispatcher = Dispatcher::from_config(&config)?;

    // Go through the same validation as the API
    let body = serde_json::json!({ "message": message, "media": media });
    let request = ChatRequest::parse(body.to_string().as_bytes(), config.max_message_length)?;

    let reply = dispatcher.dispatch(&request).await?;
    println!("{}", serde_json::to_string_pretty(&reply)?);

    Ok(())
}
