//! SQLite Command Log Repository
//!
//! 审计日志：追加写入 + 条件查询 + 原子状态回写

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, QueryBuilder, Sqlite};
use uuid::Uuid;

use super::{format_timestamp, map_db_error, parse_timestamp, DbPool};
use crate::application::ports::{
    CommandLogRecord, CommandLogRepositoryPort, LogFilter, NewCommandLog, RepositoryError,
    StatusUpdate, UpdateResult,
};
use crate::domain::{CommandStatus, Role};

const SELECT_COLUMNS: &str = "SELECT id, restaurant_id, role, target, message, status, error_message, created_at, updated_at FROM command_logs";

/// SQLite Command Log Repository
pub struct SqliteCommandLogRepository {
    pool: DbPool,
}

impl SqliteCommandLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CommandLogRow {
    id: String,
    restaurant_id: String,
    role: String,
    target: String,
    message: String,
    status: String,
    error_message: Option<String>,
    created_at: String,
    updated_at: Option<String>,
}

impl TryFrom<CommandLogRow> for CommandLogRecord {
    type Error = RepositoryError;

    fn try_from(row: CommandLogRow) -> Result<Self, Self::Error> {
        Ok(CommandLogRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            restaurant_id: row.restaurant_id,
            role: Role::from_str(&row.role).ok_or_else(|| {
                RepositoryError::SerializationError(format!("Unknown role: {}", row.role))
            })?,
            target: row.target,
            message: row.message,
            status: CommandStatus::from_str(&row.status).ok_or_else(|| {
                RepositoryError::SerializationError(format!("Unknown status: {}", row.status))
            })?,
            error_message: row.error_message,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: row.updated_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

#[async_trait]
impl CommandLogRepositoryPort for SqliteCommandLogRepository {
    async fn append(&self, entry: NewCommandLog) -> Result<Uuid, RepositoryError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO command_logs (id, restaurant_id, role, target, message, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&entry.restaurant_id)
        .bind(entry.role.as_str())
        .bind(&entry.target)
        .bind(&entry.message)
        .bind(CommandStatus::Enviado.as_str())
        .bind(format_timestamp(&Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CommandLogRecord>, RepositoryError> {
        let row: Option<CommandLogRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        row.map(CommandLogRecord::try_from).transpose()
    }

    async fn query(
        &self,
        filter: &LogFilter,
        limit: usize,
    ) -> Result<Vec<CommandLogRecord>, RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_COLUMNS);
        let mut separator = " WHERE ";

        if let Some(restaurant_id) = &filter.restaurant_id {
            builder.push(separator).push("restaurant_id = ").push_bind(restaurant_id.clone());
            separator = " AND ";
        }
        if let Some(role) = filter.role {
            builder.push(separator).push("role = ").push_bind(role.as_str());
            separator = " AND ";
        }
        if let Some(status) = filter.status {
            builder.push(separator).push("status = ").push_bind(status.as_str());
            separator = " AND ";
        }
        if let Some(from) = &filter.from {
            builder.push(separator).push("created_at >= ").push_bind(format_timestamp(from));
            separator = " AND ";
        }
        if let Some(to) = &filter.to {
            builder.push(separator).push("created_at <= ").push_bind(format_timestamp(to));
        }

        builder
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit as i64);

        let rows: Vec<CommandLogRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(CommandLogRecord::try_from).collect()
    }

    async fn update_status(&self, update: &StatusUpdate) -> Result<UpdateResult, RepositoryError> {
        let updated_at = format_timestamp(&update.updated_at);

        // 单条语句完成比较与写入：时间戳更新且状态允许迁移时才生效
        let result = sqlx::query(
            r#"
            UPDATE command_logs SET
                status = ?,
                error_message = ?,
                updated_at = ?
            WHERE id = ?
              AND (updated_at IS NULL OR updated_at < ?)
              AND (status = ? OR status = ?)
            "#,
        )
        .bind(update.status.as_str())
        .bind(&update.error_message)
        .bind(&updated_at)
        .bind(update.id.to_string())
        .bind(&updated_at)
        .bind(CommandStatus::Enviado.as_str())
        .bind(update.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.applied_or_stale(update.id, result.rows_affected()).await
    }

    async fn settle_status(&self, update: &StatusUpdate) -> Result<UpdateResult, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE command_logs SET
                status = ?,
                error_message = ?,
                updated_at = ?
            WHERE id = ? AND updated_at IS NULL
            "#,
        )
        .bind(update.status.as_str())
        .bind(&update.error_message)
        .bind(format_timestamp(&update.updated_at))
        .bind(update.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.applied_or_stale(update.id, result.rows_affected()).await
    }
}

impl SqliteCommandLogRepository {
    /// 未命中时区分记录不存在与条件不满足
    async fn applied_or_stale(
        &self,
        id: Uuid,
        rows_affected: u64,
    ) -> Result<UpdateResult, RepositoryError> {
        if rows_affected > 0 {
            return Ok(UpdateResult::Applied);
        }

        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM command_logs WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        match exists {
            Some(_) => Ok(UpdateResult::Stale),
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }
}
