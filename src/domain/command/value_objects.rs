//! Command Context - Value Objects

use serde::{Deserialize, Serialize};

/// 解析后的指令
///
/// 不变量:
/// - target 已小写并经过同义词归一化
/// - restaurant_id 不含 `]`
/// - message 非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    target: String,
    restaurant_id: String,
    message: String,
}

impl Command {
    pub(super) fn new(target: String, restaurant_id: String, message: String) -> Self {
        Self {
            target,
            restaurant_id,
            message,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 拆分为 (target, restaurant_id, message)
    pub fn into_parts(self) -> (String, String, String) {
        (self.target, self.restaurant_id, self.message)
    }
}

/// 审计记录状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    /// 已发送（提交时的初始状态，或投递确认）
    Enviado,
    /// 投递失败
    Error,
    /// 等待重试
    Retry,
}

impl CommandStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandStatus::Enviado => "enviado",
            CommandStatus::Error => "error",
            CommandStatus::Retry => "retry",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "enviado" => Some(CommandStatus::Enviado),
            "error" => Some(CommandStatus::Error),
            "retry" => Some(CommandStatus::Retry),
            _ => None,
        }
    }

    /// 状态只能从 enviado 迁出，失败状态不会回退
    pub fn can_transition_to(&self, next: CommandStatus) -> bool {
        *self == CommandStatus::Enviado || *self == next
    }
}

impl Default for CommandStatus {
    fn default() -> Self {
        CommandStatus::Enviado
    }
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        for status in [CommandStatus::Enviado, CommandStatus::Error, CommandStatus::Retry] {
            assert_eq!(CommandStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(CommandStatus::from_str("sent"), None);
    }

    #[test]
    fn test_failure_never_reverts() {
        assert!(CommandStatus::Enviado.can_transition_to(CommandStatus::Error));
        assert!(CommandStatus::Enviado.can_transition_to(CommandStatus::Enviado));
        assert!(CommandStatus::Error.can_transition_to(CommandStatus::Error));
        assert!(!CommandStatus::Error.can_transition_to(CommandStatus::Enviado));
        assert!(!CommandStatus::Retry.can_transition_to(CommandStatus::Enviado));
    }
}
