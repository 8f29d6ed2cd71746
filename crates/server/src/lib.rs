//! PromptHub HTTP 서버
//!
//! Actix-web 기반 REST API (프롬프트 CRUD, 채팅, 문서 분류)

pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_support;

use actix_web::{web, App, HttpServer};
use prompthub_common::{AppConfig, Result};
use prompthub_llm::{ChatService, ClientOptions, OllamaClient};
use prompthub_store::PgPromptStore;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use state::AppState;

/// Build the Ollama client described by `config`
pub fn ollama_client(config: &AppConfig) -> Result<OllamaClient> {
    OllamaClient::new(ClientOptions {
        base_url: Some(config.ollama_base_url.clone()),
        api_key: config.ollama_api_key.clone(),
        timeout: Some(config.ollama_timeout()),
    })
}

/// Connect the store, wire services and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let store = PgPromptStore::connect(&config.database_url, config.database_max_connections).await?;
    store.run_migrations().await?;

    let ollama = Arc::new(ollama_client(&config)?);
    let chat = ChatService::new(ollama.clone()).with_default_model(config.default_model.clone());

    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config, Arc::new(store), chat, ollama));

    info!("HTTP server listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
