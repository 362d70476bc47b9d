use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use audioscroll_content::ContentError;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Body did not deserialize at all (syntax, types, unknown fields).
    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Audiobook snippet not found")]
    SnippetNotFound,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound(what) => ApiError::NotFound(what),
            ContentError::SnippetNotFound => ApiError::SnippetNotFound,
            ContentError::Store(e) => ApiError::Internal(e.to_string()),
            ContentError::Decode(..) => ApiError::Internal(err.to_string()),
        }
    }
}

fn is_production() -> bool {
    std::env::var("APP_ENV").is_ok_and(|env| env == "production")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{} not found", what) })),
            )
                .into_response(),
            ApiError::SnippetNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Audiobook snippet not found" })),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                error!("request failed: {}", detail);
                // The underlying failure is only echoed back outside
                // production.
                let body = if is_production() {
                    json!({ "error": "Internal server error" })
                } else {
                    json!({ "error": "Internal server error", "detail": detail })
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
