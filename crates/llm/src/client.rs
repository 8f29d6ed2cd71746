use async_trait::async_trait;
use prompthub_common::{AppConfig, PromptHubError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::extract::{extract_text, ResponseBody};
use crate::llm_trait::{ModelCatalog, TextGenerator};
use crate::types::{GenerateOptions, GenerateRequest, GenerationResult, ModelInfo};

/// Explicit client settings; unset fields fall back to the environment, then defaults
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

/// Resolved client settings, fixed for the client's lifetime
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl ClientConfig {
    /// Resolve options against `OLLAMA_BASE_URL`, `OLLAMA_API_KEY` and `OLLAMA_TIMEOUT_MS`
    pub fn resolve(options: ClientOptions) -> Result<Self> {
        Self::resolve_with(options, |key| std::env::var(key).ok())
    }

    /// Resolve options against an arbitrary key lookup
    ///
    /// Environment keys are read through [`AppConfig::from_lookup`], which also
    /// supplies the defaults.
    pub fn resolve_with<F>(options: ClientOptions, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = AppConfig::from_lookup(lookup);
        let env_timeout = env.ollama_timeout();

        let base_url = options.base_url.unwrap_or(env.ollama_base_url);
        let api_key = options
            .api_key
            .or(env.ollama_api_key)
            .filter(|key| !key.is_empty());
        let timeout = options
            .timeout
            .unwrap_or(env_timeout);

        let base_url = Url::parse(&base_url).map_err(|e| {
            PromptHubError::config(format!("Invalid Ollama base URL '{}': {}", base_url, e))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(PromptHubError::config(
                "Ollama base URL must start with http:// or https://",
            ));
        }

        Ok(Self {
            base_url,
            api_key,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    config: ClientConfig,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(options: ClientOptions) -> Result<Self> {
        Self::with_config(ClientConfig::resolve(options)?)
    }

    /// Create client from already resolved settings
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| PromptHubError::network(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Ollama client initialized: {} (timeout: {}ms, auth: {})",
            config.base_url,
            config.timeout.as_millis(),
            config.has_api_key()
        );
        Ok(Self { config, client })
    }

    /// Generate text with a model
    ///
    /// Single attempt. Fails with `Timeout` when no response headers arrive in
    /// time and with `Upstream` on a non-success status.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<GenerationResult> {
        let payload = GenerateRequest::new(model, prompt, options);

        debug!(
            "Sending generate request to Ollama - Model: {}, Prompt length: {}",
            model,
            prompt.len()
        );

        let url = self.endpoint(&["api", "generate"]);
        let body = self.request(self.client.post(url).json(&payload)).await?;
        let text = extract_text(&body);

        debug!("Received response from Ollama - Text length: {}", text.len());

        Ok(GenerationResult {
            text,
            raw: options.raw.then(|| body.into_value()),
        })
    }

    /// List available models (best-effort)
    pub async fn list_models(&self) -> Vec<String> {
        match self.try_list_models().await {
            Ok(models) => models,
            Err(e) => {
                debug!("Model listing unavailable: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_list_models(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&["api", "models"]);
        let body = self.request(self.client.get(url)).await?;

        let models = match body {
            ResponseBody::Json(Value::Array(entries)) => {
                entries.iter().map(model_name).collect()
            }
            _ => Vec::new(),
        };

        Ok(models)
    }

    /// Get model info (best-effort)
    pub async fn get_model_info(&self, name: &str) -> Option<ModelInfo> {
        let url = self.endpoint(&["api", "models", name]);

        match self.request(self.client.get(url)).await {
            Ok(ResponseBody::Malformed) => {
                debug!("Model info for {} was not valid JSON", name);
                None
            }
            Ok(body) => Some(ModelInfo {
                name: name.to_string(),
                description: body
                    .field("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                tags: body
                    .field("tags")
                    .and_then(Value::as_array)
                    .map(|tags| {
                        tags.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    }),
            }),
            Err(e) => {
                debug!("Model info unavailable for {}: {}", name, e);
                None
            }
        }
    }

    /// Simple health check
    pub async fn ping(&self) -> bool {
        let url = self.endpoint(&["api", "ping"]);

        match self.request(self.client.get(url)).await {
            Ok(ResponseBody::Text(text)) | Ok(ResponseBody::Json(Value::String(text))) => {
                !text.is_empty()
            }
            Ok(ResponseBody::Json(_)) => true,
            Ok(ResponseBody::Malformed) => false,
            Err(e) => {
                debug!("Ollama ping failed: {}", e);
                false
            }
        }
    }

    /// Build `{base}/seg/seg/..`; each segment is percent-encoded on its own
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.config.base_url.clone();
        // http(s) URLs always have a path, checked in ClientConfig::resolve
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send one request bounded by the configured timeout and read the body
    async fn request(&self, builder: RequestBuilder) -> Result<ResponseBody> {
        let mut builder = builder.header(CONTENT_TYPE, "application/json");
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        // Dropping the send future on timeout aborts the connection.
        let response = match tokio::time::timeout(self.config.timeout, builder.send()).await {
            Ok(sent) => sent.map_err(|e| {
                if e.is_timeout() {
                    PromptHubError::Timeout(self.config.timeout)
                } else {
                    PromptHubError::network(format!("Failed to send request: {}", e))
                }
            })?,
            Err(_) => {
                warn!(
                    "Ollama request timed out after {}ms",
                    self.config.timeout.as_millis()
                );
                return Err(PromptHubError::Timeout(self.config.timeout));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Ollama request failed with status {}", status);
            return Err(PromptHubError::upstream(status.as_u16(), body));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);

        if is_json {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| PromptHubError::network(format!("Failed to read response body: {}", e)))?;

            match serde_json::from_slice(&bytes) {
                Ok(value) => Ok(ResponseBody::Json(value)),
                Err(e) => {
                    warn!("Ollama returned malformed JSON: {}", e);
                    Ok(ResponseBody::Malformed)
                }
            }
        } else {
            let text = response
                .text()
                .await
                .map_err(|e| PromptHubError::network(format!("Failed to read response body: {}", e)))?;
            Ok(ResponseBody::Text(text))
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<GenerationResult> {
        self.generate(model, prompt, options).await
    }
}

#[async_trait]
impl ModelCatalog for OllamaClient {
    async fn list_models(&self) -> Vec<String> {
        self.list_models().await
    }

    async fn get_model_info(&self, name: &str) -> Option<ModelInfo> {
        self.get_model_info(name).await
    }

    async fn ping(&self) -> bool {
        self.ping().await
    }
}

fn model_name(entry: &Value) -> String {
    match entry {
        Value::String(name) => name.clone(),
        other => other
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| other.to_string()),
    }
}
