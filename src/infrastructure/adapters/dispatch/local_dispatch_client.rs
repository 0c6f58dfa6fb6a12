//! Local Dispatch Client - 进程内投递
//!
//! 不经过投递服务，直接在后台任务中运行 DeliveryWorker

use tokio::sync::mpsc;

use crate::application::ports::{DeliveryReport, DispatchClientPort, DispatchRequest};
use crate::domain::DeliveryJob;
use crate::infrastructure::worker::DeliveryWorker;

/// 进程内投递客户端
pub struct LocalDispatchClient {
    worker: DeliveryWorker,
    reports: mpsc::Sender<DeliveryReport>,
}

impl LocalDispatchClient {
    pub fn new(worker: DeliveryWorker, reports: mpsc::Sender<DeliveryReport>) -> Self {
        Self { worker, reports }
    }
}

impl DispatchClientPort for LocalDispatchClient {
    fn submit(&self, request: DispatchRequest) {
        let worker = self.worker.clone();
        let reports = self.reports.clone();

        tokio::spawn(async move {
            let log_id = request.log_id;
            let job = DeliveryJob {
                log_id: log_id.to_string(),
                restaurant_id: request.restaurant_id,
                target: request.target,
                message: request.message,
            };

            let outcome = worker.dispatch(&job).await;
            if reports.send(DeliveryReport { log_id, outcome }).await.is_err() {
                tracing::warn!(log_id = %log_id, "Delivery report channel closed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeliveryOutcome, FanOutMode, RetryPolicy};
    use crate::infrastructure::worker::DeliveryWorkerConfig;
    use crate::testing::{FixedDirectory, ScriptedChannel};
    use std::sync::Arc;
    use std::time::Duration;
    use uuid::Uuid;

    #[tokio::test(start_paused = true)]
    async fn test_local_dispatch_reports_outcome() {
        let channel = Arc::new(ScriptedChannel::failing_for(&["111"]));
        let worker = DeliveryWorker::new(
            DeliveryWorkerConfig {
                retry: RetryPolicy::new(2, Duration::from_millis(100)),
                fan_out: FanOutMode::Sequential,
            },
            channel.clone(),
            Arc::new(FixedDirectory::of(&["111"])),
        );
        let (tx, mut rx) = mpsc::channel(4);
        let client = LocalDispatchClient::new(worker, tx);

        let log_id = Uuid::new_v4();
        client.submit(DispatchRequest {
            log_id,
            restaurant_id: "r1".to_string(),
            target: "chef".to_string(),
            message: "hola".to_string(),
        });

        let report = rx.recv().await.unwrap();
        assert_eq!(report.log_id, log_id);
        assert!(matches!(report.outcome, DeliveryOutcome::FailedAfterRetries { .. }));
        assert_eq!(channel.attempts_for("111"), 2);
    }
}
