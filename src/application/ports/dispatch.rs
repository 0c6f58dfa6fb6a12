//! Dispatch Port - 投递子系统提交抽象
//!
//! 提交是非阻塞的：调用方立即返回，网络调用在后台任务中完成。
//! 投递子系统的最终结果通过 `DeliveryReport` 通道回传给状态回写。

use thiserror::Error;
use uuid::Uuid;

use crate::domain::DeliveryOutcome;

/// 提交错误（仅记录日志，不向调用方暴露）
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Delivery subsystem unreachable: {0}")]
    Unreachable(String),

    #[error("Unexpected response from delivery subsystem: HTTP {status}: {body}")]
    UnexpectedResponse { status: u16, body: String },
}

/// 投递请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    pub log_id: Uuid,
    pub restaurant_id: String,
    pub target: String,
    pub message: String,
}

/// 投递结果回报
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub log_id: Uuid,
    pub outcome: DeliveryOutcome,
}

/// Dispatch Client Port
///
/// `submit` 不等待、不重试，也不返回错误
pub trait DispatchClientPort: Send + Sync {
    fn submit(&self, request: DispatchRequest);
}
