//! Command Log Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    format_timestamp, CommandLogRecord, CommandLogRepositoryPort, LogFilter, LOG_EXPORT_LIMIT,
    LOG_LIST_LIMIT,
};
use crate::application::queries::{ExportCommandLogs, ListCommandLogs};

/// 导出 CSV 的列顺序
pub const EXPORT_COLUMNS: [&str; 9] = [
    "id",
    "restaurant_id",
    "role",
    "target",
    "message",
    "status",
    "error_message",
    "created_at",
    "updated_at",
];

// ============================================================================
// Handlers
// ============================================================================

/// ListCommandLogs Handler
pub struct ListCommandLogsHandler {
    audit_log: Arc<dyn CommandLogRepositoryPort>,
}

impl ListCommandLogsHandler {
    pub fn new(audit_log: Arc<dyn CommandLogRepositoryPort>) -> Self {
        Self { audit_log }
    }

    pub async fn handle(
        &self,
        query: ListCommandLogs,
    ) -> Result<Vec<CommandLogRecord>, ApplicationError> {
        Ok(self.audit_log.query(&query.filter, LOG_LIST_LIMIT).await?)
    }
}

/// ExportCommandLogs Handler
pub struct ExportCommandLogsHandler {
    audit_log: Arc<dyn CommandLogRepositoryPort>,
}

impl ExportCommandLogsHandler {
    pub fn new(audit_log: Arc<dyn CommandLogRepositoryPort>) -> Self {
        Self { audit_log }
    }

    /// 返回 CSV 文本
    pub async fn handle(&self, _query: ExportCommandLogs) -> Result<String, ApplicationError> {
        let records = self
            .audit_log
            .query(&LogFilter::default(), LOG_EXPORT_LIMIT)
            .await?;

        tracing::debug!(rows = records.len(), "Exporting command logs");
        Ok(render_csv(&records))
    }
}

// ============================================================================
// CSV
// ============================================================================

/// 渲染 CSV：每个字段都 JSON 字符串化，缺失字段为 `""`
pub fn render_csv(records: &[CommandLogRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(EXPORT_COLUMNS.join(","));

    for record in records {
        let fields = [
            record.id.to_string(),
            record.restaurant_id.clone(),
            record.role.as_str().to_string(),
            record.target.clone(),
            record.message.clone(),
            record.status.as_str().to_string(),
            record.error_message.clone().unwrap_or_default(),
            format_timestamp(&record.created_at),
            record
                .updated_at
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_default(),
        ];
        let line = fields
            .iter()
            .map(|f| serde_json::Value::String(f.clone()).to_string())
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}
