//! Auth HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::ExchangeIdToken;
use crate::infrastructure::http::dto::{ExchangeRequest, ExchangeResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// ID token 换取访问令牌
pub async fn exchange_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExchangeRequest>, JsonRejection>,
) -> Result<Json<ExchangeResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|_| ApiError::BadRequest("Invalid payload".to_string()))?;

    let response = state
        .exchange_token_handler
        .handle(ExchangeIdToken {
            id_token: request.id_token,
        })
        .await?;

    Ok(Json(ExchangeResponse {
        token: response.token,
        user: response.user,
    }))
}
