use std::time::Duration;

use anyhow::{Error, Result};
use tracing::Instrument;

use crate::core::AppConfig;
use crate::openai::{Message, Role, completion, completion_text};
use crate::persona::{Persona, PersonaCatalog, SystemPrompt};
use crate::providers::ProviderConfig;

use super::language::detect_language;
use super::models::{ChatReply, ChatRequest};
use super::offline::OfflineResponder;

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_DEADLINE: Duration = Duration::from_secs(30);

/// Answers a single chat turn.
///
/// Configured providers are tried one at a time in order and the
/// first successful completion is returned. When none are configured,
/// all of them fail, or the request deadline passes, the reply comes
/// from the persona's offline tables instead.
///
/// Holds no per-request state so one instance is shared by every
/// request. Use `Dispatcher::builder()` to construct one.
pub struct Dispatcher {
    client: reqwest::Client,
    providers: Vec<ProviderConfig>,
    system_prompt: SystemPrompt,
    offline: OfflineResponder,
    display_name: String,
    greeting: String,
    provider_timeout: Duration,
    request_deadline: Duration,
}

impl Dispatcher {
    pub fn builder(persona: Persona) -> DispatcherBuilder {
        DispatcherBuilder::new(persona)
    }

    /// Wires up the persona and providers described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let catalog = PersonaCatalog::load(config.persona_file.as_deref())?;
        let persona = catalog.get(&config.persona)?.clone();

        Self::builder(persona)
            .providers(config.providers.clone())
            .provider_timeout(config.provider_timeout)
            .request_deadline(config.request_deadline)
            .build()
    }

    pub fn providers(&self) -> &[ProviderConfig] {
        &self.providers
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub async fn dispatch(&self, request: &ChatRequest) -> Result<ChatReply, Error> {
        let user_message = request.user_message();
        let language = detect_language(user_message);
        let messages = vec![
            Message::new(Role::System, &self.system_prompt.render(&request.media)?),
            Message::new(Role::User, user_message),
        ];

        tracing::debug!(
            ?language,
            media = request.media.len(),
            history = request.chat_history.len(),
            providers = self.providers.len(),
            "Dispatching chat request"
        );

        match tokio::time::timeout(self.request_deadline, self.try_providers(&messages)).await {
            Ok(Some(reply)) => return Ok(reply),
            Ok(None) => {}
            Err(_) => tracing::warn!(
                "Request deadline of {:?} reached before any provider answered",
                self.request_deadline
            ),
        }

        let reply = self.offline.respond(&request.message, language);
        tracing::info!(provider = %reply.provider, "Answered in offline mode");
        Ok(reply)
    }

    /// Walks the provider chain and stops at the first success.
    /// Failures are logged and never surfaced to the caller.
    async fn try_providers(&self, messages: &[Message]) -> Option<ChatReply> {
        for provider in self.providers.iter() {
            let span = tracing::info_span!("provider", name = %provider.name);
            let result = async {
                tracing::debug!("Calling {}", provider.endpoint);
                completion(&self.client, provider, messages, self.provider_timeout).await
            }
            .instrument(span)
            .await;

            match result {
                Ok(resp) => {
                    tracing::info!(provider = %provider.name, "Provider answered");
                    return Some(ChatReply::online(&provider.name, &completion_text(&resp)));
                }
                Err(e) => {
                    tracing::warn!(provider = %provider.name, "Provider failed: {}", e);
                }
            }
        }
        None
    }
}

pub struct DispatcherBuilder {
    persona: Persona,
    providers: Vec<ProviderConfig>,
    provider_timeout: Duration,
    request_deadline: Duration,
}

impl DispatcherBuilder {
    pub fn new(persona: Persona) -> Self {
        Self {
            persona,
            providers: Vec::new(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            request_deadline: DEFAULT_REQUEST_DEADLINE,
        }
    }

    /// Providers are tried in the order given
    pub fn providers(mut self, providers: Vec<ProviderConfig>) -> Self {
        self.providers = providers;
        self
    }

    pub fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = deadline;
        self
    }

    pub fn build(self) -> Result<Dispatcher> {
        Ok(Dispatcher {
            client: reqwest::Client::new(),
            providers: self.providers,
            system_prompt: SystemPrompt::new(&self.persona.system_prompt)?,
            offline: OfflineResponder::new(self.persona.offline),
            display_name: self.persona.display_name,
            greeting: self.persona.greeting,
            provider_timeout: self.provider_timeout,
            request_deadline: self.request_deadline,
        })
    }
}
