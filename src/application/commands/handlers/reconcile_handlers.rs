//! Status Reconciler
//!
//! 将投递最终结果回写到审计记录。每条记录只回写一次。

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::ReconcileDelivery;
use crate::application::error::ApplicationError;
use crate::application::ports::{CommandLogRepositoryPort, StatusUpdate, UpdateResult};
use crate::domain::{CommandStatus, DeliveryOutcome};

/// 回写结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileResult {
    /// 状态已更新
    Updated(CommandStatus),
    /// 记录已回写过，本次忽略
    AlreadyReconciled,
}

/// Status Reconciler
pub struct StatusReconciler {
    audit_log: Arc<dyn CommandLogRepositoryPort>,
}

impl StatusReconciler {
    pub fn new(audit_log: Arc<dyn CommandLogRepositoryPort>) -> Self {
        Self { audit_log }
    }

    pub async fn handle(
        &self,
        command: ReconcileDelivery,
    ) -> Result<ReconcileResult, ApplicationError> {
        let log_id = command.log_id;

        let entry = self
            .audit_log
            .find_by_id(log_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("CommandLog", log_id))?;

        if entry.updated_at.is_some() {
            tracing::debug!(log_id = %log_id, status = %entry.status, "Already reconciled, skipping");
            return Ok(ReconcileResult::AlreadyReconciled);
        }

        let (status, error_message) = match command.outcome {
            DeliveryOutcome::AllDelivered => (CommandStatus::Enviado, None),
            DeliveryOutcome::FailedAfterRetries {
                recipient,
                last_error,
            } => (
                CommandStatus::Error,
                Some(format!("{}: {}", recipient, last_error)),
            ),
        };

        let update = StatusUpdate {
            id: log_id,
            status,
            error_message,
            updated_at: Utc::now(),
        };

        match self.audit_log.settle_status(&update).await? {
            UpdateResult::Applied => {
                tracing::info!(log_id = %log_id, status = %status, "Command status reconciled");
                Ok(ReconcileResult::Updated(status))
            }
            UpdateResult::Stale => {
                tracing::debug!(log_id = %log_id, "Concurrent reconciliation won, skipping");
                Ok(ReconcileResult::AlreadyReconciled)
            }
        }
    }

    /// 回写投递结果
    pub async fn reconcile(
        &self,
        log_id: Uuid,
        outcome: DeliveryOutcome,
    ) -> Result<ReconcileResult, ApplicationError> {
        self.handle(ReconcileDelivery { log_id, outcome }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NewCommandLog;
    use crate::domain::Role;
    use crate::infrastructure::persistence::sqlite::SqliteCommandLogRepository;
    use crate::testing::{memory_pool, seed_restaurant};

    async fn setup() -> (StatusReconciler, Arc<SqliteCommandLogRepository>, Uuid) {
        let pool = memory_pool().await;
        seed_restaurant(&pool, "r1").await;
        let audit_log = Arc::new(SqliteCommandLogRepository::new(pool));
        let id = audit_log
            .append(NewCommandLog {
                restaurant_id: "r1".to_string(),
                role: Role::Gm,
                target: "chef".to_string(),
                message: "hola".to_string(),
            })
            .await
            .unwrap();
        (StatusReconciler::new(audit_log.clone()), audit_log, id)
    }

    #[tokio::test]
    async fn test_delivered_confirms_enviado() {
        let (reconciler, audit_log, id) = setup().await;

        let result = reconciler
            .reconcile(id, DeliveryOutcome::AllDelivered)
            .await
            .unwrap();
        assert_eq!(result, ReconcileResult::Updated(CommandStatus::Enviado));

        let record = audit_log.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.status, CommandStatus::Enviado);
        assert!(record.error_message.is_none());
        assert!(record.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_failure_records_error() {
        let (reconciler, audit_log, id) = setup().await;
        let outcome = DeliveryOutcome::FailedAfterRetries {
            recipient: "15551234567".to_string(),
            last_error: "HTTP 503".to_string(),
        };

        reconciler.reconcile(id, outcome).await.unwrap();

        let record = audit_log.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.status, CommandStatus::Error);
        assert_eq!(record.error_message.as_deref(), Some("15551234567: HTTP 503"));
    }

    #[tokio::test]
    async fn test_second_reconcile_is_noop() {
        let (reconciler, audit_log, id) = setup().await;
        let outcome = DeliveryOutcome::FailedAfterRetries {
            recipient: "15551234567".to_string(),
            last_error: "timeout".to_string(),
        };

        reconciler.reconcile(id, outcome.clone()).await.unwrap();
        let first = audit_log.find_by_id(id).await.unwrap().unwrap();

        let result = reconciler.reconcile(id, outcome).await.unwrap();
        assert_eq!(result, ReconcileResult::AlreadyReconciled);

        let second = audit_log.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_error_is_not_overwritten_by_late_success() {
        let (reconciler, audit_log, id) = setup().await;
        reconciler
            .reconcile(
                id,
                DeliveryOutcome::FailedAfterRetries {
                    recipient: "a".to_string(),
                    last_error: "boom".to_string(),
                },
            )
            .await
            .unwrap();

        reconciler
            .reconcile(id, DeliveryOutcome::AllDelivered)
            .await
            .unwrap();

        let record = audit_log.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.status, CommandStatus::Error);
    }

    #[tokio::test]
    async fn test_concurrent_reports_settle_once() {
        let (reconciler, audit_log, id) = setup().await;
        let failure = DeliveryOutcome::FailedAfterRetries {
            recipient: "a".to_string(),
            last_error: "boom".to_string(),
        };

        let (delivered, failed) = tokio::join!(
            reconciler.reconcile(id, DeliveryOutcome::AllDelivered),
            reconciler.reconcile(id, failure),
        );
        let results = [delivered.unwrap(), failed.unwrap()];

        let winners: Vec<CommandStatus> = results
            .iter()
            .filter_map(|r| match r {
                ReconcileResult::Updated(status) => Some(*status),
                ReconcileResult::AlreadyReconciled => None,
            })
            .collect();
        assert_eq!(winners.len(), 1);

        let record = audit_log.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.status, winners[0]);
    }

    #[tokio::test]
    async fn test_unknown_log_is_not_found() {
        let (reconciler, _, _) = setup().await;
        let err = reconciler
            .reconcile(Uuid::new_v4(), DeliveryOutcome::AllDelivered)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
