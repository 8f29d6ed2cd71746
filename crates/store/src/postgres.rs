use async_trait::async_trait;
use prompthub_common::{PromptHubError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

use crate::store::PromptStore;
use crate::types::{CreatePrompt, Prompt, UpdatePrompt};

/// Postgres-backed prompt store
#[derive(Debug, Clone)]
pub struct PgPromptStore {
    pool: PgPool,
}

impl PgPromptStore {
    /// Connect a pool to `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        info!("Connecting to PostgreSQL (max connections: {})", max_connections);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| PromptHubError::database(format!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the prompts table if needed
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| PromptHubError::database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl PromptStore for PgPromptStore {
    async fn create(&self, prompt: &CreatePrompt) -> Result<Prompt> {
        let created = sqlx::query_as::<_, Prompt>(
            "INSERT INTO prompts (title, content) VALUES ($1, $2) \
             RETURNING id, title, content, created_at",
        )
        .bind(&prompt.title)
        .bind(&prompt.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PromptHubError::database(format!("Failed to create prompt: {}", e)))?;

        info!("Prompt created: {}", created.id);
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Prompt>> {
        sqlx::query_as::<_, Prompt>("SELECT id, title, content, created_at FROM prompts ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PromptHubError::database(format!("Failed to list prompts: {}", e)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Prompt>> {
        sqlx::query_as::<_, Prompt>(
            "SELECT id, title, content, created_at FROM prompts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PromptHubError::database(format!("Failed to fetch prompt {}: {}", id, e)))
    }

    async fn update(&self, id: i64, patch: &UpdatePrompt) -> Result<Option<Prompt>> {
        let Some(existing) = self.find_by_id(id).await? else {
            debug!("Prompt {} not found for update", id);
            return Ok(None);
        };

        let (title, content) = patch.merge(&existing);

        let updated = sqlx::query_as::<_, Prompt>(
            "UPDATE prompts SET title = $1, content = $2 WHERE id = $3 \
             RETURNING id, title, content, created_at",
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PromptHubError::database(format!("Failed to update prompt {}: {}", id, e)))?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PromptHubError::database(format!("Failed to delete prompt {}: {}", id, e)))?;

        Ok(result.rows_affected() > 0)
    }
}
