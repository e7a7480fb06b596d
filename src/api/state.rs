use std::sync::Arc;

use anyhow::Result;

use crate::chat::Dispatcher;
use crate::core::AppConfig;

/// Read only after startup so it is shared without a lock
pub struct AppState {
    pub config: AppConfig,
    pub dispatcher: Dispatcher,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig, dispatcher: Dispatcher) -> Self {
        Self { config, dispatcher }
    }

    pub fn from_config(config: AppConfig) -> Result<Self> {
        let dispatcher = Dispatcher::from_config(&config)?;
        Ok(Self::new(config, dispatcher))
    }
}
