//! Health Handler

use axum::Json;

use crate::infrastructure::http::dto::OkResponse;

/// 健康检查
pub async fn health() -> Json<OkResponse> {
    Json(OkResponse::ok())
}
