//! Webhook HTTP Handlers
//!
//! 渠道订阅校验；入站事件只确认不处理

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::infrastructure::http::dto::WebhookVerifyParams;
use crate::infrastructure::http::state::DeliveryState;

/// 订阅校验：mode 为 subscribe 且令牌匹配时回显 challenge
pub async fn verify_webhook(
    State(state): State<Arc<DeliveryState>>,
    Query(params): Query<WebhookVerifyParams>,
) -> Response {
    let subscribed = params.mode.as_deref() == Some("subscribe")
        && !state.webhook_verify_token.is_empty()
        && params.verify_token.as_deref() == Some(state.webhook_verify_token.as_str());

    if subscribed {
        tracing::info!("Webhook subscription verified");
        (StatusCode::OK, params.challenge.unwrap_or_default()).into_response()
    } else {
        StatusCode::FORBIDDEN.into_response()
    }
}

/// 确认入站事件
pub async fn receive_webhook(body: Bytes) -> StatusCode {
    tracing::debug!(bytes = body.len(), "Inbound webhook event acknowledged");
    StatusCode::OK
}
