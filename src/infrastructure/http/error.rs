//! HTTP Error Handling
//!
//! 错误以真实 HTTP 状态码返回，响应体 `{"error": "..."}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;
use crate::domain::AccessError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            recipient: None,
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    /// 存储失败，细节只进日志
    Storage(String),
    Internal(String),
    ServiceUnavailable(String),
    /// 投递重试耗尽
    DeliveryFailed { details: String, recipient: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, response) = match self {
            ApiError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg))
            }
            ApiError::Unauthorized(msg) => {
                tracing::debug!(error = %msg, "Unauthorized");
                (StatusCode::UNAUTHORIZED, ErrorResponse::new(msg))
            }
            ApiError::Forbidden(msg) => {
                tracing::debug!(error = %msg, "Forbidden");
                (StatusCode::FORBIDDEN, ErrorResponse::new(msg))
            }
            ApiError::NotFound(msg) => {
                tracing::debug!(error = %msg, "Resource not found");
                (StatusCode::NOT_FOUND, ErrorResponse::new(msg))
            }
            ApiError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new("DB error"))
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg))
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(error = %msg, "Service unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::new(msg))
            }
            ApiError::DeliveryFailed { details, recipient } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Failed to deliver".to_string(),
                    details: Some(details),
                    recipient: Some(recipient),
                },
            ),
        };

        (status, Json(response)).into_response()
    }
}

impl From<AccessError> for ApiError {
    fn from(e: AccessError) -> Self {
        ApiError::Forbidden(e.to_string())
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, .. } => {
                ApiError::NotFound(format!("{} not found", resource_type))
            }
            ApplicationError::InvalidPayload(msg) => ApiError::BadRequest(msg),
            ApplicationError::InvalidSyntax(_) => {
                ApiError::BadRequest("Invalid command syntax".to_string())
            }
            ApplicationError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            ApplicationError::Forbidden(msg) => ApiError::Forbidden(msg),
            ApplicationError::StorageError(msg) => ApiError::Storage(msg),
            ApplicationError::DeliveryError(msg) => ApiError::Internal(msg),
            ApplicationError::SubmissionUnreachable(msg) => ApiError::ServiceUnavailable(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}
