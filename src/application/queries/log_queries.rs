//! Command Log Queries

use crate::application::ports::LogFilter;

/// 按条件列出审计记录（最多 500 条）
#[derive(Debug, Clone, Default)]
pub struct ListCommandLogs {
    pub filter: LogFilter,
}

/// 导出最近的审计记录（忽略过滤条件，最多 2000 条）
#[derive(Debug, Clone, Default)]
pub struct ExportCommandLogs;
