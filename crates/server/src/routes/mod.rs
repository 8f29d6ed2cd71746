pub mod chat;
pub mod models;
pub mod prompts;
pub mod system;

use actix_web::{http::StatusCode, web, HttpResponse};
use prompthub_common::PromptHubError;
use tracing::{error, warn};

use crate::types::ErrorResponse;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/prompts")
            .service(prompts::list_prompts)
            .service(prompts::get_prompt)
            .service(prompts::create_prompt)
            .service(prompts::update_prompt)
            .service(prompts::delete_prompt),
    )
    .service(chat::chat)
    .service(chat::classify)
    .service(models::list_models)
    .service(models::get_model_info)
    .service(system::health);
}

/// Map a service error to its JSON response
pub(crate) fn error_response(err: &PromptHubError) -> HttpResponse {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }

    let body = match err {
        PromptHubError::Upstream { status, body } => {
            ErrorResponse::new(format!("Generation provider returned {}", status)).with_details(body.clone())
        }
        other => ErrorResponse::new(other.to_string()),
    };

    HttpResponse::build(status).json(body)
}

pub(crate) fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not found"))
}

pub(crate) fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(message))
}
