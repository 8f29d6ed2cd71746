use serde::{Deserialize, Serialize};

/// Error body returned by every route
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Body accepted by `POST /prompts`
#[derive(Debug, Deserialize)]
pub struct NewPromptRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

/// Delete confirmation
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// Model listing
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

/// Health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,

    /// Whether the generation provider answered the ping
    pub ollama: bool,
}
