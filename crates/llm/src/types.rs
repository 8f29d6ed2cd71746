use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sampling options for a single generate call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,

    /// Temperature
    pub temperature: Option<f64>,

    /// Top-k sampling
    pub top_k: Option<u32>,

    /// Top-p sampling
    pub top_p: Option<f64>,

    /// Attach the parsed provider payload to the result
    pub raw: bool,
}

impl GenerateOptions {
    /// Options with no sampling overrides that keep the raw payload
    pub fn with_raw() -> Self {
        Self {
            raw: true,
            ..Self::default()
        }
    }
}

/// Ollama generate request body
///
/// Sampling fields that were not supplied are left out of the payload entirely.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    /// Model name (e.g., "llama3", "gemma2")
    pub model: &'a str,

    /// Prompt text
    pub prompt: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

impl<'a> GenerateRequest<'a> {
    /// Build the payload for `model` and `prompt`
    pub fn new(model: &'a str, prompt: &'a str, options: &GenerateOptions) -> Self {
        Self {
            model,
            prompt,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_k: options.top_k,
            top_p: options.top_p,
        }
    }
}

/// Normalized generation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Extracted text, empty when the provider body had no recognizable field
    pub text: String,

    /// Full parsed provider body, present only when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

/// Model metadata reported by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Transcript entry role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Any role the renderer does not know; rendered as bare content
    #[serde(untagged)]
    Other(String),
}

impl Role {
    /// Rendering prefix, `None` for unrecognized roles
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::System => Some("System"),
            Self::User => Some("User"),
            Self::Assistant => Some("Assistant"),
            Self::Other(_) => None,
        }
    }
}

/// Single chat transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Chat request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Model to use (falls back to the service default)
    #[serde(default)]
    pub model: Option<String>,

    /// New user message
    #[serde(default)]
    pub message: String,

    /// Prior conversation
    #[serde(default)]
    pub history: Option<Vec<ChatMessage>>,

    /// Instruction placed before the conversation
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Chat reply together with the updated history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub model: String,
    pub history: Vec<ChatMessage>,
}

/// Document to classify
#[derive(Debug, Clone, Default)]
pub struct ClassifyInput {
    /// Decoded document text
    pub content: String,
    pub filename: String,
    pub mime_type: String,
    pub model: Option<String>,
    pub instruction: Option<String>,
}

/// Classification result; `classification` is the model text verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub filename: String,
    pub mime_type: String,
    pub classification: String,
    pub model: String,
}
