//! Dispatch Commands - 指令提交与状态回写

use uuid::Uuid;

use crate::domain::{AuthUser, CommandStatus, DeliveryOutcome};

/// 提交操作员指令
#[derive(Debug, Clone)]
pub struct SubmitCommand {
    pub input: String,
    pub submitter: AuthUser,
}

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitCommandResponse {
    pub id: Uuid,
    pub target: String,
    pub restaurant_id: String,
    pub message: String,
    pub status: CommandStatus,
}

/// 回写投递结果
#[derive(Debug, Clone)]
pub struct ReconcileDelivery {
    pub log_id: Uuid,
    pub outcome: DeliveryOutcome,
}
