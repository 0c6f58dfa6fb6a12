//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{IdentityError, RepositoryError, TokenError};
use crate::domain::{AccessError, SyntaxError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 请求结构不合法
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// 指令语法不匹配
    #[error("Invalid command syntax: {0}")]
    InvalidSyntax(String),

    /// 缺少或无效的凭证
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 角色或餐厅范围不足
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 审计存储不可用
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 渠道调用重试耗尽
    #[error("Delivery error: {0}")]
    DeliveryError(String),

    /// 投递子系统不可达
    #[error("Delivery subsystem unreachable: {0}")]
    SubmissionUnreachable(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建请求结构错误
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload(message.into())
    }

    /// 创建禁止访问错误
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::NotFound {
                resource_type: "Entity",
                id,
            },
            other => Self::StorageError(other.to_string()),
        }
    }
}

impl From<SyntaxError> for ApplicationError {
    fn from(err: SyntaxError) -> Self {
        Self::InvalidSyntax(err.input)
    }
}

impl From<AccessError> for ApplicationError {
    fn from(err: AccessError) -> Self {
        Self::Forbidden(err.to_string())
    }
}

impl From<TokenError> for ApplicationError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => Self::InternalError(msg),
            other => Self::Unauthorized(other.to_string()),
        }
    }
}

impl From<IdentityError> for ApplicationError {
    fn from(err: IdentityError) -> Self {
        Self::Unauthorized(err.to_string())
    }
}
