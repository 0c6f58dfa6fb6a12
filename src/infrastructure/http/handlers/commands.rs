//! Command HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::SubmitCommand;
use crate::domain::access::COMMAND_SUBMITTERS;
use crate::infrastructure::http::dto::{SubmitCommandRequest, SubmitCommandResponseDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::Authenticated;
use crate::infrastructure::http::state::AppState;

/// 提交操作员指令
///
/// 角色：GM、SuperAdmin
pub async fn submit_command(
    State(state): State<Arc<AppState>>,
    Authenticated(user): Authenticated,
    payload: Result<Json<SubmitCommandRequest>, JsonRejection>,
) -> Result<Json<SubmitCommandResponseDto>, ApiError> {
    COMMAND_SUBMITTERS.check(&user)?;

    let Json(request) =
        payload.map_err(|_| ApiError::BadRequest("Invalid payload".to_string()))?;

    let response = state
        .submit_command_handler
        .handle(SubmitCommand {
            input: request.input,
            submitter: user,
        })
        .await?;

    Ok(Json(response.into()))
}
