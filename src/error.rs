use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::databases::messages::StoreError;

/// Every failure the messages API can report. Rendered as
/// `{ "success": false, "error": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Message store unavailable")]
    StoreUnavailable(#[source] StoreError),

    #[error("Failed to fetch messages")]
    StoreReadFailed(#[source] StoreError),

    #[error("Failed to add message")]
    StoreWriteFailed(#[source] StoreError),

    #[error("Method Not Allowed")]
    MethodNotSupported,
}

impl ApiError {
    pub fn read(err: StoreError) -> Self {
        if err.is_unavailable() {
            ApiError::StoreUnavailable(err)
        } else {
            ApiError::StoreReadFailed(err)
        }
    }

    pub fn write(err: StoreError) -> Self {
        if err.is_unavailable() {
            ApiError::StoreUnavailable(err)
        } else {
            ApiError::StoreWriteFailed(err)
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MethodNotSupported => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::StoreUnavailable(_)
            | ApiError::StoreReadFailed(_)
            | ApiError::StoreWriteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::StoreUnavailable(e)
            | ApiError::StoreReadFailed(e)
            | ApiError::StoreWriteFailed(e) => log::error!("{}: {}", self, e),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}
