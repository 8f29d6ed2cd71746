use prompthub_common::AppConfig;
use prompthub_llm::{ChatService, ModelCatalog};
use prompthub_store::PromptStore;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Prompt records
    pub prompts: Arc<dyn PromptStore>,

    /// Chat and classification
    pub chat: ChatService,

    /// Provider introspection
    pub models: Arc<dyn ModelCatalog>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: AppConfig,
        prompts: Arc<dyn PromptStore>,
        chat: ChatService,
        models: Arc<dyn ModelCatalog>,
    ) -> Self {
        Self {
            config,
            prompts,
            chat,
            models,
        }
    }
}
