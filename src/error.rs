use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::translate::TranslationResponse;

/// Request rejected at the HTTP boundary, before any backend sees it
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    InvalidRequest { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest { status, .. } => *status,
        };
        // Same shape as a failed translation so clients parse one type
        (status, Json(TranslationResponse::failure(self.to_string()))).into_response()
    }
}

/// Failures talking to a translation backend over HTTP
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn into_failure(self) -> TranslationResponse {
        TranslationResponse::failure(self.to_string())
    }
}
