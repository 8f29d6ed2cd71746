use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use super::not_found;
use crate::state::AppState;
use crate::types::ModelsResponse;

/// GET /models - Models reported by the generation provider (empty when unavailable)
#[get("/models")]
pub async fn list_models(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let models = state.models.list_models().await;
    HttpResponse::Ok().json(ModelsResponse { models })
}

/// GET /models/{name}
#[get("/models/{name}")]
pub async fn get_model_info(path: web::Path<String>, state: web::Data<Arc<AppState>>) -> HttpResponse {
    match state.models.get_model_info(&path).await {
        Some(info) => HttpResponse::Ok().json(info),
        None => not_found(),
    }
}
