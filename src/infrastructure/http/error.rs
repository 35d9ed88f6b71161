//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
        }
    }
}

/// 内部错误对外只返回这条信息，细节写日志
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errno = status.as_u16() as i32;

        let message = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno, error = %msg, "Resource not found");
                msg
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno, error = %msg, "Bad request");
                msg
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(errno, error = %msg, "Payload too large");
                msg
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno, error = %msg, "Internal server error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse::new(errno, message))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::InvalidState(_)
            | ApplicationError::ExternalServiceError { .. }
            | ApplicationError::StorageError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(format!("Failed to read multipart field: {}", e.body_text()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_external_failure_is_generic_500() {
        let err: ApiError =
            ApplicationError::external("telemetry", "Semantic error: table not found").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = read_json(response).await;
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
        assert_eq!(body["errno"], 500);
    }

    #[tokio::test]
    async fn test_not_found_keeps_message() {
        let err: ApiError = ApplicationError::not_found("Audio", "x.wav").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = read_json(response).await;
        assert_eq!(body["error"], "Audio not found: x.wav");
    }

    #[test]
    fn test_storage_failure_is_internal() {
        let err: ApiError = ApplicationError::StorageError("disk full".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: ApiError = ApplicationError::validation("bad name").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
