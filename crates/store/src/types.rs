use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored prompt record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Prompt {
    /// Database identifier
    pub id: i64,

    /// Short title
    pub title: String,

    /// Prompt body
    pub content: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePrompt {
    pub title: String,
    pub content: String,
}

/// Partial update; missing fields keep their stored values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePrompt {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

impl UpdatePrompt {
    /// Merge this patch over an existing record, returning the new (title, content)
    pub fn merge(&self, existing: &Prompt) -> (String, String) {
        (
            self.title.clone().unwrap_or_else(|| existing.title.clone()),
            self.content.clone().unwrap_or_else(|| existing.content.clone()),
        )
    }
}
