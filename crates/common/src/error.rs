use std::time::Duration;

/// PromptHub error types
#[derive(Debug, thiserror::Error)]
pub enum PromptHubError {
    /// No response headers arrived within the configured duration
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Generation provider answered with a non-success status
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PromptHubError {
    /// Create upstream error
    pub fn upstream<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Create database error
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }
}

// HTTP response conversion
impl PromptHubError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Timeout(_) => 504,
            Self::Upstream { .. } => 502,
            Self::Network(_) => 503,
            Self::Database(_) | Self::Config(_) | Self::Io(_) => 500,
        }
    }
}
