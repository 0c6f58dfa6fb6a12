//! Domain Layer - 领域层
//!
//! 包含:
//! - Command Context: 指令解析与审计状态
//! - Access Context: 角色与访问守卫
//! - Delivery Context: 投递任务、结果与重试策略

pub mod access;
pub mod command;
pub mod delivery;

pub use access::{AccessError, AuthUser, Role, RoleGuard};
pub use command::{Command, CommandParser, CommandStatus, SynonymTable, SyntaxError};
pub use delivery::{DeliveryJob, DeliveryOutcome, FanOutMode, RecipientResult, RetryPolicy};
