//! External LLM providers and the order they are tried in.

use std::fmt;

pub const DEFAULT_MAX_TOKENS: u32 = 1200;
pub const DEFAULT_TEMPERATURE: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    Xai,
    Custom,
    OpenAi,
}

impl ProviderKind {
    /// Priority order of the fallback chain. Only providers with a
    /// configured credential take part, but the relative order never
    /// changes.
    pub const CHAIN: [ProviderKind; 4] = [
        ProviderKind::Groq,
        ProviderKind::Xai,
        ProviderKind::Custom,
        ProviderKind::OpenAi,
    ];

    pub fn key_var(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::Xai => "XAI_API_KEY",
            ProviderKind::Custom => "XBOW_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn endpoint_var(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_URL",
            ProviderKind::Xai => "XAI_API_URL",
            ProviderKind::Custom => "XBOW_ENDPOINT",
            ProviderKind::OpenAi => "OPENAI_API_URL",
        }
    }

    pub fn model_var(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_MODEL",
            ProviderKind::Xai => "XAI_MODEL",
            ProviderKind::Custom => "XBOW_MODEL",
            ProviderKind::OpenAi => "OPENAI_MODEL",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "https://api.groq.com/openai/v1/chat/completions",
            ProviderKind::Xai => "https://api.x.ai/v1/chat/completions",
            ProviderKind::Custom => "http://localhost:8000/v1/chat/completions",
            ProviderKind::OpenAi => "https://api.openai.com/v1/chat/completions",
        }
    }

    /// The custom endpoint picks its own model unless one is set
    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Groq => Some("llama-3.3-70b-versatile"),
            ProviderKind::Xai => Some("grok-2"),
            ProviderKind::Custom => None,
            ProviderKind::OpenAi => Some("gpt-4o"),
        }
    }

    /// Tag reported in the `provider` field of an online reply
    pub fn tag(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq-llama-3.3-70b-versatile",
            ProviderKind::Xai => "xai-grok-2",
            ProviderKind::Custom => "xbow-xaibo-modular-agent",
            ProviderKind::OpenAi => "openai-gpt4o",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub name: String,
    pub endpoint: String,
    pub api_key: String,
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ProviderConfig {
    /// A provider with the stock endpoint, model and sampling settings.
    pub fn new(kind: ProviderKind, api_key: &str) -> Self {
        Self {
            kind,
            name: kind.tag().to_string(),
            endpoint: kind.default_endpoint().to_string(),
            api_key: api_key.to_string(),
            model: kind.default_model().map(String::from),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn model(mut self, model: Option<&str>) -> Self {
        self.model = model.map(String::from);
        self
    }

    pub fn sampling(mut self, max_tokens: u32, temperature: f64) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }
}

/// Builds the fallback chain from a variable lookup. A provider is
/// included only when its key is set to a non-empty value.
pub fn configured_providers<F>(lookup: F, max_tokens: u32, temperature: f64) -> Vec<ProviderConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    ProviderKind::CHAIN
        .iter()
        .filter_map(|kind| {
            let api_key = non_empty(kind.key_var())?;
            let mut provider =
                ProviderConfig::new(*kind, &api_key).sampling(max_tokens, temperature);
            if let Some(endpoint) = non_empty(kind.endpoint_var()) {
                provider = provider.endpoint(&endpoint);
            }
            if let Some(model) = non_empty(kind.model_var()) {
                provider = provider.model(Some(&model));
            }
            Some(provider)
        })
        .collect()
}
