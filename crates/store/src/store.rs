use async_trait::async_trait;
use prompthub_common::Result;

use crate::types::{CreatePrompt, Prompt, UpdatePrompt};

/// Prompt record persistence
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Insert a new prompt and return the stored record
    async fn create(&self, prompt: &CreatePrompt) -> Result<Prompt>;

    /// All prompts ordered by id
    async fn find_all(&self) -> Result<Vec<Prompt>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Prompt>>;

    /// Apply a partial update; `None` when no prompt has this id
    async fn update(&self, id: i64, patch: &UpdatePrompt) -> Result<Option<Prompt>>;

    /// Remove a prompt; `true` when a row was deleted
    async fn delete(&self, id: i64) -> Result<bool>;
}
