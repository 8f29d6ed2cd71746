use async_trait::async_trait;
use prompthub_common::Result;

use crate::types::{GenerateOptions, GenerationResult, ModelInfo};

/// Text generation backend used by the chat service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text from a prompt; failures propagate to the caller
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<GenerationResult>;
}

/// Best-effort provider introspection
///
/// None of these calls can fail: an unreachable or confused provider
/// looks the same as one with nothing to report.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// Available model names, empty on any failure
    async fn list_models(&self) -> Vec<String>;

    /// Metadata for one model, `None` on any failure
    async fn get_model_info(&self, name: &str) -> Option<ModelInfo>;

    /// Health probe, `false` on any failure
    async fn ping(&self) -> bool;
}
