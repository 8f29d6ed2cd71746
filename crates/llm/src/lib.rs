//! PromptHub LLM Integration
//!
//! Ollama API client, response normalization and the chat/classification service

mod chat;
mod client;
mod extract;
mod llm_trait;
mod prompts;
mod types;

pub use chat::{assemble_history, ChatService};
pub use client::{ClientConfig, ClientOptions, OllamaClient};
pub use extract::{extract_text, ExtractionRule, ResponseBody, EXTRACTION_RULES};
pub use llm_trait::{ModelCatalog, TextGenerator};
pub use prompts::{classification_prompt, render_transcript, DEFAULT_CLASSIFY_INSTRUCTION};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, ClassifyInput, ClassifyResponse, GenerateOptions,
    GenerateRequest, GenerationResult, ModelInfo, Role,
};
