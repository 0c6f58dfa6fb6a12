//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{CommandStatus, Role};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Command Log (Audit Log)
// ============================================================================

/// 标准列表查询上限
pub const LOG_LIST_LIMIT: usize = 500;

/// 导出查询上限
pub const LOG_EXPORT_LIMIT: usize = 2000;

/// 审计时间戳格式：定宽 RFC3339（微秒，UTC），字典序即时间序
///
/// 存储、列表与导出共用
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 指令审计记录
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLogRecord {
    pub id: Uuid,
    pub restaurant_id: String,
    pub role: Role,
    pub target: String,
    pub message: String,
    pub status: CommandStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 新审计记录的字段（id、状态、时间由仓储生成）
#[derive(Debug, Clone)]
pub struct NewCommandLog {
    pub restaurant_id: String,
    pub role: Role,
    pub target: String,
    pub message: String,
}

/// 审计日志过滤条件
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub restaurant_id: Option<String>,
    pub role: Option<Role>,
    pub status: Option<CommandStatus>,
    /// created_at >= from
    pub from: Option<DateTime<Utc>>,
    /// created_at <= to
    pub to: Option<DateTime<Utc>>,
}

/// 状态回写
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub id: Uuid,
    pub status: CommandStatus,
    pub error_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// 状态回写结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    /// 已写入
    Applied,
    /// 已有更新（或不允许的状态回退），本次忽略
    Stale,
}

/// Command Log Repository Port
///
/// 追加写入互不加锁；同一记录的状态回写为原子比较更新
#[async_trait]
pub trait CommandLogRepositoryPort: Send + Sync {
    /// 追加审计记录，返回新生成的 id
    async fn append(&self, entry: NewCommandLog) -> Result<Uuid, RepositoryError>;

    /// 根据 ID 查找记录
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CommandLogRecord>, RepositoryError>;

    /// 按条件查询，created_at 倒序
    async fn query(
        &self,
        filter: &LogFilter,
        limit: usize,
    ) -> Result<Vec<CommandLogRecord>, RepositoryError>;

    /// 回写投递状态
    ///
    /// - id 不存在时返回 `RepositoryError::NotFound`
    /// - 已存的 updated_at 不早于本次时返回 `UpdateResult::Stale`
    async fn update_status(&self, update: &StatusUpdate) -> Result<UpdateResult, RepositoryError>;

    /// 一次性回写投递结果
    ///
    /// 仅当记录从未回写过（updated_at 为空）时生效，并发回写只有一个成功
    /// - id 不存在时返回 `RepositoryError::NotFound`
    /// - 已回写过时返回 `UpdateResult::Stale`
    async fn settle_status(&self, update: &StatusUpdate) -> Result<UpdateResult, RepositoryError>;
}

// ============================================================================
// Restaurant Repository
// ============================================================================

/// 餐厅实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantRecord {
    pub id: String,
    pub name: String,
    pub locale: String,
}

/// Restaurant Repository Port
#[async_trait]
pub trait RestaurantRepositoryPort: Send + Sync {
    /// 保存餐厅（存在则更新）
    async fn save(&self, restaurant: &RestaurantRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找餐厅
    async fn find_by_id(&self, id: &str) -> Result<Option<RestaurantRecord>, RepositoryError>;

    /// 删除餐厅（级联删除其审计记录），返回是否存在
    async fn delete(&self, id: &str) -> Result<bool, RepositoryError>;
}

// ============================================================================
// User Repository
// ============================================================================

/// 用户实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uid: String,
    pub role: Role,
    pub restaurants: Vec<String>,
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 保存用户（存在则更新）
    async fn save(&self, user: &UserRecord) -> Result<(), RepositoryError>;

    /// 根据 uid 查找用户
    async fn find_by_uid(&self, uid: &str) -> Result<Option<UserRecord>, RepositoryError>;
}
