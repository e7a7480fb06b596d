//! Personas bundle everything that differs between the renamed
//! copies of the assistant: the system prompt, the spoken greeting
//! and the canned offline replies.

mod prompt;
pub use prompt::{SystemPrompt, media_context};

use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;

const BUILTIN_CATALOG: &str = include_str!("../../data/personas.json");

#[derive(Clone, Debug, Deserialize)]
pub struct Trigger {
    pub phrase: String,
    pub reply: String,
}

/// Canned replies selected by substring match. Iteration order of
/// `triggers` decides which reply wins when several phrases match.
#[derive(Clone, Debug, Deserialize)]
pub struct OfflineTable {
    pub provider: String,
    pub default: String,
    pub triggers: Vec<Trigger>,
}

impl OfflineTable {
    /// Reply for the first trigger contained in `message`, falling
    /// back to the table default.
    pub fn lookup(&self, message: &str) -> &str {
        let lowered = message.to_lowercase();
        self.triggers
            .iter()
            .find(|t| lowered.contains(&t.phrase))
            .map(|t| t.reply.as_str())
            .unwrap_or(self.default.as_str())
    }

    fn normalize(&mut self, label: &str) -> Result<()> {
        if self.default.trim().is_empty() {
            bail!("Offline table {} has an empty default reply", label);
        }
        for trigger in self.triggers.iter_mut() {
            let phrase = trigger.phrase.trim().to_lowercase();
            if phrase.is_empty() {
                bail!("Offline table {} has an empty trigger phrase", label);
            }
            trigger.phrase = phrase;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct OfflineTables {
    pub english: OfflineTable,
    pub hinglish: OfflineTable,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Persona {
    pub display_name: String,
    pub greeting: String,
    pub system_prompt: String,
    pub offline: OfflineTables,
}

pub struct PersonaCatalog(HashMap<String, Persona>);

impl PersonaCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).context("Built-in persona catalog is invalid")
    }

    pub fn from_path(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read persona file {}", path))?;
        Self::from_json(&contents).with_context(|| format!("Invalid persona file {}", path))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let mut personas: HashMap<String, Persona> = serde_json::from_str(contents)?;
        for (id, persona) in personas.iter_mut() {
            persona
                .offline
                .english
                .normalize(&format!("{}.english", id))?;
            persona
                .offline
                .hinglish
                .normalize(&format!("{}.hinglish", id))?;
        }
        Ok(Self(personas))
    }

    /// Loads the external catalog when a path is given, otherwise the
    /// one compiled into the binary.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::builtin(),
        }
    }

    pub fn get(&self, id: &str) -> Result<&Persona> {
        self.0.get(id).ok_or_else(|| {
            let mut known: Vec<&String> = self.0.keys().collect();
            known.sort();
            anyhow!("Unknown persona {}. Known personas: {:?}", id, known)
        })
    }
}
