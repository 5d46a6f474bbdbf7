use std::collections::HashMap;

use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::databases::messages::{MessageStore, NewMessage, MAX_LIST_LIMIT};
use crate::error::ApiError;

/// Largest JSON body accepted on create. Text fields are not length-limited
/// beyond what fits in one request.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Fields are optional so a missing field is reported as invalid input
/// instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub username: Option<String>,
    pub content: Option<String>,
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

impl CreateMessageRequest {
    pub fn validate(self) -> Result<NewMessage, ApiError> {
        if is_blank(self.username.as_deref()) || is_blank(self.content.as_deref()) {
            return Err(ApiError::InvalidInput(
                "Username and content are required".to_string(),
            ));
        }

        Ok(NewMessage {
            username: self.username.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
        })
    }
}

/// `limit` is a hint: unparsable values fall back to the cap, numbers are
/// clamped into `1..=MAX_LIST_LIMIT`.
fn effective_limit(requested: Option<&str>) -> i64 {
    requested
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .map_or(MAX_LIST_LIMIT, |n| n.clamp(1, MAX_LIST_LIMIT))
}

pub async fn list_messages(
    store: web::Data<dyn MessageStore>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let query = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map(|q| q.into_inner())
        .unwrap_or_default();
    let limit = effective_limit(query.get("limit").map(String::as_str));

    let messages = store.list_recent(limit).await.map_err(ApiError::read)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "messages": messages,
    })))
}

pub async fn create_message(
    store: web::Data<dyn MessageStore>,
    body: web::Json<CreateMessageRequest>,
) -> Result<HttpResponse, ApiError> {
    let new_message = body.into_inner().validate()?;

    let saved = store.insert(new_message).await.map_err(ApiError::write)?;
    log::debug!("Stored message {} from {:?}", saved.id, saved.username);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Message added successfully",
    })))
}

pub async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotSupported)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            ApiError::PayloadTooLarge.into()
        }
        other => ApiError::InvalidInput(format!("Invalid request body: {}", other)).into(),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/messages")
            .app_data(
                web::JsonConfig::default()
                    .limit(MAX_BODY_BYTES)
                    .error_handler(json_error_handler),
            )
            .route(web::get().to(list_messages))
            .route(web::post().to(create_message))
            .default_service(web::route().to(method_not_allowed)),
    );
}
