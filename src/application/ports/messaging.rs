//! Messaging Ports - 消息渠道与收件人目录

use async_trait::async_trait;
use thiserror::Error;

/// 渠道调用错误
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Channel API error: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Messaging Channel Port
///
/// 单一消息渠道（WhatsApp Cloud API）。只有远端返回成功状态才算成功。
#[async_trait]
pub trait MessagingChannelPort: Send + Sync {
    /// 向单个收件人发送文本
    async fn send_text(&self, to: &str, text: &str) -> Result<(), ChannelError>;
}

/// Recipient Directory Port
///
/// 按 (餐厅, 目标工位) 查找收件人地址
#[async_trait]
pub trait RecipientDirectoryPort: Send + Sync {
    async fn resolve(&self, restaurant_id: &str, target: &str) -> Vec<String>;
}
