use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use futures_util::StreamExt;
use prompthub_llm::{ChatRequest, ClassifyInput};
use std::sync::Arc;
use tracing::{debug, info};

use super::{bad_request, error_response};
use crate::state::AppState;
use crate::types::ErrorResponse;

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// POST /chat
///
/// Body: `{ model?, message, history?, systemPrompt? }`
#[post("/chat")]
pub async fn chat(req: web::Json<ChatRequest>, state: web::Data<Arc<AppState>>) -> HttpResponse {
    if req.message.is_empty() {
        return bad_request("message is required");
    }

    match state.chat.chat(&req).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}

/// POST /classify
///
/// Multipart: `file` plus optional `model` and `instruction` text fields
#[post("/classify")]
pub async fn classify(
    mut payload: Multipart,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let limit = state.config.max_upload_bytes;
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut model = None;
    let mut instruction = None;

    while let Some(field) = payload.next().await {
        let mut field = field?;
        let content_disposition = field.content_disposition();
        let name = content_disposition.get_name().unwrap_or("").to_string();
        let filename = content_disposition.get_filename().map(str::to_string);

        match name.as_str() {
            "file" | "model" | "instruction" => {
                let Some(data) = read_limited(&mut field, limit).await? else {
                    info!("Rejected multipart field '{}': larger than {} bytes", name, limit);
                    return Ok(HttpResponse::PayloadTooLarge().json(ErrorResponse::new(format!(
                        "{} exceeds the {} byte upload limit",
                        name, limit
                    ))));
                };

                match name.as_str() {
                    "file" => {
                        let mime_type = field
                            .content_type()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
                        let filename = filename.unwrap_or_else(|| "unknown".to_string());
                        file = Some((filename, mime_type, data));
                    }
                    "model" => model = Some(String::from_utf8_lossy(&data).into_owned()),
                    _ => instruction = Some(String::from_utf8_lossy(&data).into_owned()),
                }
            }
            other => {
                debug!("Ignoring multipart field '{}'", other);
                while let Some(chunk) = field.next().await {
                    chunk?;
                }
            }
        }
    }

    let Some((filename, mime_type, data)) = file else {
        return Ok(bad_request("file is required"));
    };

    let input = ClassifyInput {
        content: String::from_utf8_lossy(&data).into_owned(),
        filename,
        mime_type,
        model,
        instruction,
    };

    Ok(match state.chat.classify_document(&input).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    })
}

/// Read a multipart field; `None` once it grows past `limit` bytes
async fn read_limited(
    field: &mut actix_multipart::Field,
    limit: usize,
) -> actix_web::Result<Option<Vec<u8>>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if data.len() + chunk.len() > limit {
            return Ok(None);
        }
        data.extend_from_slice(&chunk);
    }
    Ok(Some(data))
}
