//! Delivery Context - 投递任务、结果与重试策略

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 投递任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryJob {
    pub log_id: String,
    pub restaurant_id: String,
    pub target: String,
    pub message: String,
}

/// 投递最终结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// 所有收件人均投递成功
    AllDelivered,
    /// 某个收件人重试耗尽
    FailedAfterRetries { recipient: String, last_error: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::AllDelivered)
    }
}

/// 单个收件人的投递结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientResult {
    pub recipient: String,
    pub attempts: u32,
    pub error: Option<String>,
}

/// 多收件人投递方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanOutMode {
    /// 逐个投递，任一收件人重试耗尽即终止整个批次
    #[default]
    Sequential,
    /// 每个收件人独立并发投递，分别收集结果
    Independent,
}

/// 指数退避重试策略
///
/// 第 n 次尝试（n >= 2）前等待 `2^(n-1) * base_delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// 第 `attempt` 次尝试前的等待时间；首次尝试或超过上限时为 None
    pub fn delay_before(&self, attempt: u32) -> Option<Duration> {
        if attempt < 2 || attempt > self.max_attempts {
            return None;
        }
        let factor = 2u32.saturating_pow(attempt - 1);
        Some(self.base_delay.saturating_mul(factor))
    }

    /// 单个收件人全部重试的退避总时长
    pub fn total_backoff(&self) -> Duration {
        (2..=self.max_attempts)
            .filter_map(|attempt| self.delay_before(attempt))
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(d))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backoff_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before(1), None);
        assert_eq!(policy.delay_before(2), Some(Duration::from_millis(1000)));
        assert_eq!(policy.delay_before(3), Some(Duration::from_millis(2000)));
        assert_eq!(policy.delay_before(4), None);
    }

    #[test]
    fn test_total_backoff_sums_every_delay() {
        assert_eq!(RetryPolicy::default().total_backoff(), Duration::from_millis(3000));
        assert_eq!(
            RetryPolicy::new(1, Duration::from_millis(500)).total_backoff(),
            Duration::ZERO
        );
    }

    #[test]
    fn test_policy_requires_one_attempt() {
        let policy = RetryPolicy::new(0, Duration::from_millis(10));
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.delay_before(2), None);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = DeliveryOutcome::FailedAfterRetries {
            recipient: "15551234567".to_string(),
            last_error: "HTTP 500".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "failed_after_retries");
        assert_eq!(json["recipient"], "15551234567");
        assert!(DeliveryOutcome::AllDelivered.is_delivered());
    }
}
