//! Reconcile Worker - 消费投递结果通道并回写状态

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::ports::DeliveryReport;
use crate::application::{ApplicationError, ReconcileResult, StatusReconciler};

/// 投递结果通道容量
pub const REPORT_CHANNEL_CAPACITY: usize = 256;

/// 回写 Worker
pub struct ReconcileWorker {
    receiver: mpsc::Receiver<DeliveryReport>,
    reconciler: Arc<StatusReconciler>,
}

impl ReconcileWorker {
    pub fn new(receiver: mpsc::Receiver<DeliveryReport>, reconciler: Arc<StatusReconciler>) -> Self {
        Self {
            receiver,
            reconciler,
        }
    }

    /// 运行直到所有发送端关闭
    pub async fn run(mut self) {
        tracing::info!("ReconcileWorker started");

        while let Some(report) = self.receiver.recv().await {
            let log_id = report.log_id;
            match self.reconciler.reconcile(log_id, report.outcome).await {
                Ok(ReconcileResult::Updated(status)) => {
                    tracing::debug!(log_id = %log_id, status = %status, "Delivery report applied");
                }
                Ok(ReconcileResult::AlreadyReconciled) => {
                    tracing::debug!(log_id = %log_id, "Delivery report ignored");
                }
                Err(ApplicationError::NotFound { .. }) => {
                    tracing::warn!(log_id = %log_id, "Delivery report for unknown command log");
                }
                Err(e) => {
                    tracing::error!(log_id = %log_id, error = %e, "Failed to reconcile delivery report");
                }
            }
        }

        tracing::info!("ReconcileWorker stopped");
    }
}
