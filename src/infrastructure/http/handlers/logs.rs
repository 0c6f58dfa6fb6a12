//! Command Log HTTP Handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::{ExportCommandLogs, ListCommandLogs, LogFilter};
use crate::domain::access::{LOG_EXPORTERS, LOG_READERS};
use crate::domain::{CommandStatus, Role};
use crate::infrastructure::http::dto::{CommandLogDto, LogQueryParams};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::Authenticated;
use crate::infrastructure::http::state::AppState;

/// 列出审计记录
///
/// 角色：Staff、GM、SuperAdmin
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
    Authenticated(user): Authenticated,
    Query(params): Query<LogQueryParams>,
) -> Result<Json<Vec<CommandLogDto>>, ApiError> {
    LOG_READERS.check(&user)?;

    let filter = parse_filter(params)?;
    let records = state
        .list_logs_handler
        .handle(ListCommandLogs { filter })
        .await?;

    Ok(Json(records.into_iter().map(CommandLogDto::from).collect()))
}

/// 导出审计记录为 CSV
///
/// 角色：GM 及以上
pub async fn export_logs(
    State(state): State<Arc<AppState>>,
    Authenticated(user): Authenticated,
) -> Result<impl IntoResponse, ApiError> {
    LOG_EXPORTERS.check(&user)?;

    let csv = state.export_logs_handler.handle(ExportCommandLogs).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"logs.csv\""),
        ],
        csv,
    ))
}

/// 查询参数 → 过滤条件；空字符串视为未提供
fn parse_filter(params: LogQueryParams) -> Result<LogFilter, ApiError> {
    fn present(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty())
    }

    fn timestamp(value: Option<String>, name: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
        present(value)
            .map(|v| {
                DateTime::parse_from_rfc3339(&v)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|_| ApiError::BadRequest(format!("Invalid {}", name)))
            })
            .transpose()
    }

    let role = present(params.role)
        .map(|r| Role::from_str(&r).ok_or_else(|| ApiError::BadRequest("Invalid role".to_string())))
        .transpose()?;
    let status = present(params.status)
        .map(|s| {
            CommandStatus::from_str(&s)
                .ok_or_else(|| ApiError::BadRequest("Invalid status".to_string()))
        })
        .transpose()?;

    Ok(LogFilter {
        restaurant_id: present(params.restaurant_id),
        role,
        status,
        from: timestamp(params.from, "from")?,
        to: timestamp(params.to, "to")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_accepts_known_values() {
        let filter = parse_filter(LogQueryParams {
            restaurant_id: Some("r1".to_string()),
            role: Some("GM".to_string()),
            status: Some("error".to_string()),
            from: Some("2024-05-01T00:00:00Z".to_string()),
            to: Some(String::new()),
        })
        .unwrap();

        assert_eq!(filter.restaurant_id.as_deref(), Some("r1"));
        assert_eq!(filter.role, Some(Role::Gm));
        assert_eq!(filter.status, Some(CommandStatus::Error));
        assert!(filter.from.is_some());
        assert!(filter.to.is_none());
    }

    #[test]
    fn test_parse_filter_rejects_unknown_values() {
        for params in [
            LogQueryParams {
                role: Some("Chef".to_string()),
                ..Default::default()
            },
            LogQueryParams {
                status: Some("done".to_string()),
                ..Default::default()
            },
            LogQueryParams {
                from: Some("yesterday".to_string()),
                ..Default::default()
            },
        ] {
            assert!(matches!(parse_filter(params), Err(ApiError::BadRequest(_))));
        }
    }
}
