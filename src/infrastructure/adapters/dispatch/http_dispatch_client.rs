//! HTTP Dispatch Client - 向投递服务提交指令
//!
//! POST {base_url}/dispatch
//! Request: {"id": "...", "restaurantId": "...", "target": "...", "message": "..."}
//! 200 → 全部送达；500 → {"error", "details", "recipient"} 重试耗尽

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::application::ports::{DeliveryReport, DispatchClientPort, DispatchError, DispatchRequest};
use crate::domain::DeliveryOutcome;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DispatchHttpRequest<'a> {
    id: String,
    restaurant_id: &'a str,
    target: &'a str,
    message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct DispatchFailureBody {
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    recipient: Option<String>,
}

/// 投递服务 HTTP 客户端
#[derive(Clone)]
pub struct HttpDispatchClient {
    client: Client,
    base_url: String,
    reports: mpsc::Sender<DeliveryReport>,
}

impl HttpDispatchClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout_secs: u64,
        reports: mpsc::Sender<DeliveryReport>,
    ) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DispatchError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            reports,
        })
    }

    fn dispatch_url(&self) -> String {
        format!("{}/dispatch", self.base_url.trim_end_matches('/'))
    }

    /// 单次调用，不重试
    async fn deliver(&self, request: &DispatchRequest) -> Result<DeliveryOutcome, DispatchError> {
        let body = DispatchHttpRequest {
            id: request.log_id.to_string(),
            restaurant_id: &request.restaurant_id,
            target: &request.target,
            message: &request.message,
        };

        let response = self
            .client
            .post(self.dispatch_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| DispatchError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(DeliveryOutcome::AllDelivered);
        }

        let text = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::INTERNAL_SERVER_ERROR {
            let failure: DispatchFailureBody = serde_json::from_str(&text).unwrap_or_default();
            return Ok(DeliveryOutcome::FailedAfterRetries {
                recipient: failure.recipient.unwrap_or_else(|| "unknown".to_string()),
                last_error: failure.details.unwrap_or(text),
            });
        }

        Err(DispatchError::UnexpectedResponse {
            status: status.as_u16(),
            body: text,
        })
    }
}

impl DispatchClientPort for HttpDispatchClient {
    fn submit(&self, request: DispatchRequest) {
        let this = self.clone();

        tokio::spawn(async move {
            let log_id = request.log_id;
            match this.deliver(&request).await {
                Ok(outcome) => {
                    tracing::debug!(log_id = %log_id, delivered = outcome.is_delivered(), "Delivery service answered");
                    if this.reports.send(DeliveryReport { log_id, outcome }).await.is_err() {
                        tracing::warn!(log_id = %log_id, "Delivery report channel closed");
                    }
                }
                Err(e) => {
                    tracing::error!(log_id = %log_id, error = %e, "Dispatch submission failed");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_stub;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use uuid::Uuid;

    fn request() -> DispatchRequest {
        DispatchRequest {
            log_id: Uuid::new_v4(),
            restaurant_id: "r1".to_string(),
            target: "chef".to_string(),
            message: "hola".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_reports_delivered() {
        let router = Router::new().route(
            "/dispatch",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["restaurantId"], "r1");
                Json(serde_json::json!({"ok": true, "id": body["id"]}))
            }),
        );
        let base = spawn_stub(router).await;
        let (tx, mut rx) = mpsc::channel(4);
        let client = HttpDispatchClient::new(base, 5, tx).unwrap();

        let request = request();
        client.submit(request.clone());

        let report = rx.recv().await.unwrap();
        assert_eq!(report.log_id, request.log_id);
        assert_eq!(report.outcome, DeliveryOutcome::AllDelivered);
    }

    #[tokio::test]
    async fn test_server_error_reports_failure() {
        let router = Router::new().route(
            "/dispatch",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "error": "Failed to deliver",
                        "details": "HTTP 500",
                        "recipient": "111"
                    })),
                )
            }),
        );
        let base = spawn_stub(router).await;
        let (tx, mut rx) = mpsc::channel(4);
        let client = HttpDispatchClient::new(base, 5, tx).unwrap();

        client.submit(request());

        let report = rx.recv().await.unwrap();
        assert_eq!(
            report.outcome,
            DeliveryOutcome::FailedAfterRetries {
                recipient: "111".to_string(),
                last_error: "HTTP 500".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_absorbed() {
        let (tx, mut rx) = mpsc::channel(4);
        let client = HttpDispatchClient::new("http://127.0.0.1:1", 5, tx).unwrap();

        client.submit(request());
        drop(client);

        assert!(rx.recv().await.is_none());
    }
}
