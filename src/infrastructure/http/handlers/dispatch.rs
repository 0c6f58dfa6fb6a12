//! Dispatch HTTP Handler - 投递服务入口
//!
//! 同步等待整批投递完成后响应

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::domain::{DeliveryJob, DeliveryOutcome};
use crate::infrastructure::http::dto::{DispatchAccepted, DispatchPayload};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::DeliveryState;

/// 投递一条指令
pub async fn dispatch(
    State(state): State<Arc<DeliveryState>>,
    payload: Result<Json<DispatchPayload>, JsonRejection>,
) -> Result<Json<DispatchAccepted>, ApiError> {
    let Json(payload) =
        payload.map_err(|_| ApiError::BadRequest("Invalid payload".to_string()))?;

    let message = payload
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing message".to_string()))?;

    let job = DeliveryJob {
        log_id: payload.id,
        restaurant_id: payload.restaurant_id,
        target: payload.target,
        message,
    };

    match state.worker.dispatch(&job).await {
        DeliveryOutcome::AllDelivered => Ok(Json(DispatchAccepted {
            ok: true,
            id: job.log_id,
            restaurant_id: job.restaurant_id,
            target: job.target,
        })),
        DeliveryOutcome::FailedAfterRetries {
            recipient,
            last_error,
        } => Err(ApiError::DeliveryFailed {
            details: last_error,
            recipient,
        }),
    }
}
