//! System prompts are Handlebars templates. Strict mode catches
//! typos in placeholder names when the persona is loaded rather than
//! silently rendering an empty string, and escaping is disabled since
//! the output is sent to an LLM, not a browser.

use anyhow::Result;
use handlebars::Handlebars;
use itertools::Itertools;
use serde_json::json;

use crate::chat::MediaAttachment;

const TEMPLATE_NAME: &str = "system";

/// Describes attached media for the model. Empty when nothing is
/// attached.
pub fn media_context(media: &[MediaAttachment]) -> String {
    if media.is_empty() {
        return String::new();
    }
    let details = media
        .iter()
        .map(|m| format!("{} ({})", m.name, m.kind))
        .join(", ");
    format!(
        "\n\n[USER_ATTACHED_IMAGES: {} image(s)]\nImage details: {}\nAnalyze and describe these images in your response if relevant to the user's query.",
        media.len(),
        details
    )
}

pub struct SystemPrompt {
    registry: Handlebars<'static>,
}

impl SystemPrompt {
    pub fn new(template: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string(TEMPLATE_NAME, template)?;

        // Render once up front so a bad placeholder fails at startup
        let prompt = Self { registry };
        prompt.render(&[])?;
        Ok(prompt)
    }

    pub fn render(&self, media: &[MediaAttachment]) -> Result<String> {
        let data = json!({ "media_context": media_context(media) });
        Ok(self.registry.render(TEMPLATE_NAME, &data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str, kind: &str) -> MediaAttachment {
        MediaAttachment {
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn test_media_context_empty() {
        assert_eq!(media_context(&[]), "");
    }

    #[test]
    fn test_media_context() {
        let media = vec![
            attachment("scan.png", "image/png"),
            attachment("burp.jpg", "image/jpeg"),
        ];
        assert_eq!(
            media_context(&media),
            "\n\n[USER_ATTACHED_IMAGES: 2 image(s)]\nImage details: scan.png (image/png), burp.jpg (image/jpeg)\nAnalyze and describe these images in your response if relevant to the user's query."
        );
    }

    #[test]
    fn test_render_without_media() {
        let prompt = SystemPrompt::new("You are Tester.{{media_context}}").unwrap();
        assert_eq!(prompt.render(&[]).unwrap(), "You are Tester.");
    }

    #[test]
    fn test_render_does_not_escape() {
        let prompt = SystemPrompt::new("Be <precise>.{{media_context}}").unwrap();
        let rendered = prompt
            .render(&[attachment("a&b.png", "image/png")])
            .unwrap();
        assert!(rendered.starts_with("Be <precise>."));
        assert!(rendered.contains("a&b.png (image/png)"));
    }

    #[test]
    fn test_unknown_placeholder_is_rejected() {
        assert!(SystemPrompt::new("You are {{persona_name}}.").is_err());
    }

    #[test]
    fn test_malformed_template_is_rejected() {
        assert!(SystemPrompt::new("You are {{#if}}").is_err());
    }
}
