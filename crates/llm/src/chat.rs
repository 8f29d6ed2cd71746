use prompthub_common::config::DEFAULT_MODEL;
use prompthub_common::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::llm_trait::TextGenerator;
use crate::prompts::{classification_prompt, render_transcript, DEFAULT_CLASSIFY_INSTRUCTION};
use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, ClassifyInput, ClassifyResponse, GenerateOptions, Role,
};

/// Chat and document classification on top of a text generator
#[derive(Clone)]
pub struct ChatService {
    generator: Arc<dyn TextGenerator>,
    default_model: String,
}

impl ChatService {
    /// Create new chat service
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Replace the model used when a request names none
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Send a message, optionally with history and a system prompt
    ///
    /// Returns the reply and the history extended with the user message and the reply.
    /// The caller's history is left untouched.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let model = self.resolve_model(request.model.as_deref());

        let mut history = assemble_history(
            request.history.as_deref().unwrap_or_default(),
            request.system_prompt.as_deref(),
            &request.message,
        );
        let prompt = render_transcript(&history);

        debug!(
            "Chat request - Model: {}, Entries: {}, Prompt length: {}",
            model,
            history.len(),
            prompt.len()
        );

        let result = self
            .generator
            .generate(&model, &prompt, &GenerateOptions::with_raw())
            .await?;

        history.push(ChatMessage::assistant(result.text.clone()));

        Ok(ChatResponse {
            reply: result.text,
            model,
            history,
        })
    }

    /// Classify a document from its extracted text
    ///
    /// The model output is returned verbatim, whatever its format.
    pub async fn classify_document(&self, input: &ClassifyInput) -> Result<ClassifyResponse> {
        let model = self.resolve_model(input.model.as_deref());
        let instruction = input
            .instruction
            .as_deref()
            .filter(|i| !i.is_empty())
            .unwrap_or(DEFAULT_CLASSIFY_INSTRUCTION);

        let prompt = classification_prompt(
            instruction,
            &input.filename,
            &input.mime_type,
            &input.content,
        );

        info!(
            "Classifying document {} ({}, {} bytes) with {}",
            input.filename,
            input.mime_type,
            input.content.len(),
            model
        );

        let result = self
            .generator
            .generate(&model, &prompt, &GenerateOptions::with_raw())
            .await?;

        Ok(ClassifyResponse {
            filename: input.filename.clone(),
            mime_type: input.mime_type.clone(),
            classification: result.text,
            model,
        })
    }

    fn resolve_model(&self, requested: Option<&str>) -> String {
        requested
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_model)
            .to_string()
    }
}

/// Build the transcript sent to the model
///
/// The system prompt goes first unless some entry already has the system role;
/// the new user message goes last.
pub fn assemble_history(
    history: &[ChatMessage],
    system_prompt: Option<&str>,
    message: &str,
) -> Vec<ChatMessage> {
    let mut entries = history.to_vec();

    if let Some(system_prompt) = system_prompt.filter(|s| !s.is_empty()) {
        if !entries.iter().any(|m| m.role == Role::System) {
            entries.insert(0, ChatMessage::system(system_prompt));
        }
    }

    entries.push(ChatMessage::user(message));
    entries
}
