//! In-memory stand-ins for route tests

use async_trait::async_trait;
use chrono::Utc;
use prompthub_common::{AppConfig, PromptHubError, Result};
use prompthub_llm::{
    ChatService, GenerateOptions, GenerationResult, ModelCatalog, ModelInfo, TextGenerator,
};
use prompthub_store::{CreatePrompt, Prompt, PromptStore, UpdatePrompt};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::state::AppState;

#[derive(Default)]
pub struct MemoryPromptStore {
    prompts: Mutex<Vec<Prompt>>,
}

impl MemoryPromptStore {
    pub fn with(prompts: Vec<(&str, &str)>) -> Self {
        let store = Self::default();
        {
            let mut rows = store.prompts.lock().unwrap();
            for (i, (title, content)) in prompts.into_iter().enumerate() {
                rows.push(Prompt {
                    id: i as i64 + 1,
                    title: title.to_string(),
                    content: content.to_string(),
                    created_at: Utc::now(),
                });
            }
        }
        store
    }
}

#[async_trait]
impl PromptStore for MemoryPromptStore {
    async fn create(&self, prompt: &CreatePrompt) -> Result<Prompt> {
        let mut rows = self.prompts.lock().unwrap();
        let created = Prompt {
            id: rows.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            title: prompt.title.clone(),
            content: prompt.content.clone(),
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Prompt>> {
        Ok(self.prompts.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Prompt>> {
        Ok(self.prompts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: i64, patch: &UpdatePrompt) -> Result<Option<Prompt>> {
        let mut rows = self.prompts.lock().unwrap();
        Ok(rows.iter_mut().find(|p| p.id == id).map(|p| {
            let (title, content) = patch.merge(p);
            p.title = title;
            p.content = content;
            p.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut rows = self.prompts.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }
}

/// Generator answering with a fixed reply, or failing when `reply` is `None`
pub struct StubGenerator {
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn timing_out() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(
        &self,
        _model: &str,
        prompt: &str,
        _options: &GenerateOptions,
    ) -> Result<GenerationResult> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(text) => Ok(GenerationResult {
                text: text.clone(),
                raw: None,
            }),
            None => Err(PromptHubError::Timeout(Duration::from_secs(30))),
        }
    }
}

/// Catalog with a fixed model list; `reachable = false` behaves like a dead provider
pub struct StubCatalog {
    pub reachable: bool,
}

#[async_trait]
impl ModelCatalog for StubCatalog {
    async fn list_models(&self) -> Vec<String> {
        if self.reachable {
            vec!["llama3".to_string(), "mistral".to_string()]
        } else {
            Vec::new()
        }
    }

    async fn get_model_info(&self, name: &str) -> Option<ModelInfo> {
        (self.reachable && name == "llama3").then(|| ModelInfo {
            name: name.to_string(),
            description: Some("Meta Llama 3".to_string()),
            tags: None,
        })
    }

    async fn ping(&self) -> bool {
        self.reachable
    }
}

pub fn test_state(
    store: MemoryPromptStore,
    generator: Arc<StubGenerator>,
    reachable: bool,
) -> Arc<AppState> {
    let config = AppConfig {
        max_upload_bytes: 64,
        ..AppConfig::default()
    };

    Arc::new(AppState::new(
        config,
        Arc::new(store),
        ChatService::new(generator),
        Arc::new(StubCatalog { reachable }),
    ))
}
