use actix_web::{delete, get, post, put, web, HttpResponse};
use prompthub_store::{CreatePrompt, UpdatePrompt};
use std::sync::Arc;
use tracing::info;

use super::{bad_request, error_response, not_found};
use crate::state::AppState;
use crate::types::{DeletedResponse, NewPromptRequest};

/// GET /prompts
#[get("")]
pub async fn list_prompts(state: web::Data<Arc<AppState>>) -> HttpResponse {
    match state.prompts.find_all().await {
        Ok(prompts) => HttpResponse::Ok().json(prompts),
        Err(e) => error_response(&e),
    }
}

/// GET /prompts/{id}
#[get("/{id}")]
pub async fn get_prompt(path: web::Path<i64>, state: web::Data<Arc<AppState>>) -> HttpResponse {
    match state.prompts.find_by_id(path.into_inner()).await {
        Ok(Some(prompt)) => HttpResponse::Ok().json(prompt),
        Ok(None) => not_found(),
        Err(e) => error_response(&e),
    }
}

/// POST /prompts
#[post("")]
pub async fn create_prompt(
    req: web::Json<NewPromptRequest>,
    state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    let req = req.into_inner();
    let (Some(title), Some(content)) = (
        req.title.filter(|t| !t.is_empty()),
        req.content.filter(|c| !c.is_empty()),
    ) else {
        return bad_request("title and content are required");
    };

    match state.prompts.create(&CreatePrompt { title, content }).await {
        Ok(created) => {
            info!("Created prompt {}", created.id);
            HttpResponse::Created().json(created)
        }
        Err(e) => error_response(&e),
    }
}

/// PUT /prompts/{id}
#[put("/{id}")]
pub async fn update_prompt(
    path: web::Path<i64>,
    req: web::Json<UpdatePrompt>,
    state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    match state.prompts.update(path.into_inner(), &req).await {
        Ok(Some(updated)) => HttpResponse::Ok().json(updated),
        Ok(None) => not_found(),
        Err(e) => error_response(&e),
    }
}

/// DELETE /prompts/{id}
#[delete("/{id}")]
pub async fn delete_prompt(path: web::Path<i64>, state: web::Data<Arc<AppState>>) -> HttpResponse {
    let id = path.into_inner();
    match state.prompts.delete(id).await {
        Ok(true) => {
            info!("Deleted prompt {}", id);
            HttpResponse::Ok().json(DeletedResponse { deleted: true })
        }
        Ok(false) => not_found(),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::configure;
    use crate::test_support::{test_state, MemoryPromptStore, StubGenerator};
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_state(
                        $store,
                        StubGenerator::replying("unused"),
                        true,
                    )))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_list_empty() {
        let app = app!(MemoryPromptStore::default());

        let resp = test::call_service(&app, test::TestRequest::get().uri("/prompts").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn test_create_prompt() {
        let app = app!(MemoryPromptStore::default());

        let req = test::TestRequest::post()
            .uri("/prompts")
            .set_json(json!({ "title": "a", "content": "b" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["title"], "a");
        assert_eq!(body["content"], "b");
    }

    #[actix_web::test]
    async fn test_create_requires_title_and_content() {
        let app = app!(MemoryPromptStore::default());

        for payload in [json!({ "title": "a" }), json!({ "title": "", "content": "b" })] {
            let req = test::TestRequest::post().uri("/prompts").set_json(payload).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "title and content are required");
        }
    }

    #[actix_web::test]
    async fn test_get_missing_prompt() {
        let app = app!(MemoryPromptStore::default());

        let resp = test::call_service(&app, test::TestRequest::get().uri("/prompts/999").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_existing_prompt() {
        let app = app!(MemoryPromptStore::with(vec![("first", "one"), ("second", "two")]));

        let req = test::TestRequest::put()
            .uri("/prompts/2")
            .set_json(json!({ "title": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], 2);
        assert_eq!(body["title"], "x");
        assert_eq!(body["content"], "two");
    }

    #[actix_web::test]
    async fn test_update_missing_prompt() {
        let app = app!(MemoryPromptStore::default());

        let req = test::TestRequest::put()
            .uri("/prompts/7")
            .set_json(json!({ "content": "y" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_prompt() {
        let app = app!(MemoryPromptStore::with(vec![("a", "b")]));

        let resp = test::call_service(&app, test::TestRequest::delete().uri("/prompts/1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "deleted": true }));

        let resp = test::call_service(&app, test::TestRequest::delete().uri("/prompts/1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
