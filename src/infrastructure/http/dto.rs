//! Data Transfer Objects
//!
//! 请求体为 camelCase，审计记录输出为 snake_case

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::format_timestamp;
use crate::application::{CommandLogRecord, SubmitCommandResponse};
use crate::domain::{AuthUser, CommandStatus, Role};

/// `{"ok": true}`
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

// ============================================================================
// Auth DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    pub id_token: String,
}

#[derive(Debug, Serialize)]
pub struct ExchangeResponse {
    pub token: String,
    pub user: AuthUser,
}

// ============================================================================
// Command DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitCommandRequest {
    pub input: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCommandResponseDto {
    pub id: Uuid,
    pub target: String,
    pub restaurant_id: String,
    pub message: String,
    pub status: CommandStatus,
}

impl From<SubmitCommandResponse> for SubmitCommandResponseDto {
    fn from(r: SubmitCommandResponse) -> Self {
        Self {
            id: r.id,
            target: r.target,
            restaurant_id: r.restaurant_id,
            message: r.message,
            status: r.status,
        }
    }
}

// ============================================================================
// Log DTOs
// ============================================================================

/// 审计记录查询参数，非法值在 handler 中转为 400
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQueryParams {
    pub restaurant_id: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommandLogDto {
    pub id: Uuid,
    pub restaurant_id: String,
    pub role: Role,
    pub target: String,
    pub message: String,
    pub status: CommandStatus,
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<CommandLogRecord> for CommandLogDto {
    fn from(r: CommandLogRecord) -> Self {
        Self {
            id: r.id,
            restaurant_id: r.restaurant_id,
            role: r.role,
            target: r.target,
            message: r.message,
            status: r.status,
            error_message: r.error_message,
            created_at: format_timestamp(&r.created_at),
            updated_at: r.updated_at.as_ref().map(format_timestamp),
        }
    }
}

// ============================================================================
// Admin DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RestaurantRequest {
    pub id: String,
    pub name: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "es".to_string()
}

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub uid: String,
    pub role: Role,
    #[serde(default)]
    pub restaurants: Vec<String>,
}

// ============================================================================
// Delivery DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DispatchPayload {
    pub id: String,
    pub restaurant_id: String,
    pub target: String,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchAccepted {
    pub ok: bool,
    pub id: String,
    pub restaurant_id: String,
    pub target: String,
}

/// Webhook 订阅校验参数
#[derive(Debug, Default, Deserialize)]
pub struct WebhookVerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}
