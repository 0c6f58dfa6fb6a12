//! Delivery Worker - 多收件人投递与指数退避重试

use futures_util::future::join_all;
use std::sync::Arc;

use crate::application::ports::{MessagingChannelPort, RecipientDirectoryPort};
use crate::domain::{DeliveryJob, DeliveryOutcome, FanOutMode, RecipientResult, RetryPolicy};

/// Worker 配置
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryWorkerConfig {
    pub retry: RetryPolicy,
    pub fan_out: FanOutMode,
}

/// 投递 Worker
///
/// 不做本地持久化，结果只通过返回值交给调用方
#[derive(Clone)]
pub struct DeliveryWorker {
    config: DeliveryWorkerConfig,
    channel: Arc<dyn MessagingChannelPort>,
    directory: Arc<dyn RecipientDirectoryPort>,
}

impl DeliveryWorker {
    pub fn new(
        config: DeliveryWorkerConfig,
        channel: Arc<dyn MessagingChannelPort>,
        directory: Arc<dyn RecipientDirectoryPort>,
    ) -> Self {
        Self {
            config,
            channel,
            directory,
        }
    }

    /// 投递一条指令到所有收件人
    pub async fn dispatch(&self, job: &DeliveryJob) -> DeliveryOutcome {
        let recipients = self
            .directory
            .resolve(&job.restaurant_id, &job.target)
            .await;

        if recipients.is_empty() {
            tracing::warn!(
                log_id = %job.log_id,
                restaurant_id = %job.restaurant_id,
                target = %job.target,
                "No recipients resolved, nothing to deliver"
            );
            return DeliveryOutcome::AllDelivered;
        }

        tracing::info!(
            log_id = %job.log_id,
            recipients = recipients.len(),
            fan_out = ?self.config.fan_out,
            "Dispatching command"
        );

        let outcome = match self.config.fan_out {
            FanOutMode::Sequential => self.dispatch_sequential(&recipients, &job.message).await,
            FanOutMode::Independent => self.dispatch_independent(&recipients, &job.message).await,
        };

        match &outcome {
            DeliveryOutcome::AllDelivered => {
                tracing::info!(log_id = %job.log_id, "All recipients delivered");
            }
            DeliveryOutcome::FailedAfterRetries {
                recipient,
                last_error,
            } => {
                tracing::error!(
                    log_id = %job.log_id,
                    recipient = %recipient,
                    error = %last_error,
                    "Delivery failed after retries"
                );
            }
        }

        outcome
    }

    /// 逐个投递，第一个重试耗尽的收件人终止整批
    async fn dispatch_sequential(&self, recipients: &[String], text: &str) -> DeliveryOutcome {
        for recipient in recipients {
            let result = self.deliver_to(recipient, text).await;
            if let Some(error) = result.error {
                return DeliveryOutcome::FailedAfterRetries {
                    recipient: result.recipient,
                    last_error: error,
                };
            }
        }
        DeliveryOutcome::AllDelivered
    }

    /// 并发投递，按目录顺序取第一个失败者
    async fn dispatch_independent(&self, recipients: &[String], text: &str) -> DeliveryOutcome {
        let results = join_all(recipients.iter().map(|r| self.deliver_to(r, text))).await;

        results
            .into_iter()
            .find_map(|result| {
                result.error.map(|error| DeliveryOutcome::FailedAfterRetries {
                    recipient: result.recipient,
                    last_error: error,
                })
            })
            .unwrap_or(DeliveryOutcome::AllDelivered)
    }

    /// 单个收件人：首次立即发送，之后按退避间隔重试
    async fn deliver_to(&self, recipient: &str, text: &str) -> RecipientResult {
        let retry = self.config.retry;
        let mut last_error = String::new();

        for attempt in 1..=retry.max_attempts {
            if let Some(delay) = retry.delay_before(attempt) {
                tracing::debug!(
                    recipient = %recipient,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Backing off before retry"
                );
                tokio::time::sleep(delay).await;
            }

            match self.channel.send_text(recipient, text).await {
                Ok(()) => {
                    tracing::debug!(recipient = %recipient, attempt, "Message delivered");
                    return RecipientResult {
                        recipient: recipient.to_string(),
                        attempts: attempt,
                        error: None,
                    };
                }
                Err(e) => {
                    tracing::warn!(recipient = %recipient, attempt, error = %e, "Send attempt failed");
                    last_error = e.to_string();
                }
            }
        }

        RecipientResult {
            recipient: recipient.to_string(),
            attempts: retry.max_attempts,
            error: Some(last_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedDirectory, ScriptedChannel};
    use std::time::Duration;

    fn job() -> DeliveryJob {
        DeliveryJob {
            log_id: "log-1".to_string(),
            restaurant_id: "r1".to_string(),
            target: "chef".to_string(),
            message: "hola".to_string(),
        }
    }

    fn worker(
        channel: Arc<ScriptedChannel>,
        recipients: &[&str],
        fan_out: FanOutMode,
    ) -> DeliveryWorker {
        DeliveryWorker::new(
            DeliveryWorkerConfig {
                retry: RetryPolicy::default(),
                fan_out,
            },
            channel,
            Arc::new(FixedDirectory::of(recipients)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_back_off_exponentially() {
        let channel = Arc::new(ScriptedChannel::with_script([Err(500), Err(500), Ok(())]));
        let worker = worker(channel.clone(), &["111"], FanOutMode::Sequential);

        let outcome = worker.dispatch(&job()).await;
        assert_eq!(outcome, DeliveryOutcome::AllDelivered);

        let attempts = channel.attempts();
        assert_eq!(attempts.len(), 3);
        assert_eq!(attempts[1].at - attempts[0].at, Duration::from_millis(1000));
        assert_eq!(attempts[2].at - attempts[1].at, Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_stops_after_max_attempts() {
        let channel = Arc::new(ScriptedChannel::failing_for(&["111"]));
        let worker = worker(channel.clone(), &["111"], FanOutMode::Sequential);

        let outcome = worker.dispatch(&job()).await;

        assert_eq!(channel.attempts_for("111"), 3);
        match outcome {
            DeliveryOutcome::FailedAfterRetries {
                recipient,
                last_error,
            } => {
                assert_eq!(recipient, "111");
                assert!(last_error.contains("500"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_aborts_remaining_recipients() {
        let channel = Arc::new(ScriptedChannel::failing_for(&["222"]));
        let worker = worker(channel.clone(), &["111", "222", "333"], FanOutMode::Sequential);

        let outcome = worker.dispatch(&job()).await;

        assert!(matches!(
            outcome,
            DeliveryOutcome::FailedAfterRetries { ref recipient, .. } if recipient == "222"
        ));
        assert_eq!(channel.attempts_for("111"), 1);
        assert_eq!(channel.attempts_for("333"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_tries_every_recipient() {
        let channel = Arc::new(ScriptedChannel::failing_for(&["222"]));
        let worker = worker(channel.clone(), &["111", "222", "333"], FanOutMode::Independent);

        let outcome = worker.dispatch(&job()).await;

        assert!(matches!(
            outcome,
            DeliveryOutcome::FailedAfterRetries { ref recipient, .. } if recipient == "222"
        ));
        assert_eq!(channel.attempts_for("111"), 1);
        assert_eq!(channel.attempts_for("222"), 3);
        assert_eq!(channel.attempts_for("333"), 1);
    }

    #[tokio::test]
    async fn test_no_recipients_is_vacuously_delivered() {
        let channel = Arc::new(ScriptedChannel::default());
        let worker = worker(channel.clone(), &[], FanOutMode::Sequential);

        assert_eq!(worker.dispatch(&job()).await, DeliveryOutcome::AllDelivered);
        assert!(channel.attempts().is_empty());
    }
}
