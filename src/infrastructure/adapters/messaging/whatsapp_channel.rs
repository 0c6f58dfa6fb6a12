//! WhatsApp Channel - WhatsApp Cloud API 文本消息
//!
//! POST {api_base}/{api_version}/{phone_number_id}/messages
//! Authorization: Bearer {access_token}
//! Body: {"messaging_product": "whatsapp", "to": "...", "type": "text", "text": {"body": "..."}}

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{ChannelError, MessagingChannelPort};

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody<'a>,
}

/// WhatsApp 渠道配置
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub api_base: String,
    pub api_version: String,
    pub phone_number_id: String,
    pub access_token: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            api_base: "https://graph.facebook.com".to_string(),
            api_version: "v20.0".to_string(),
            phone_number_id: String::new(),
            access_token: String::new(),
            timeout_secs: 10,
        }
    }
}

/// WhatsApp Cloud API 渠道
pub struct WhatsAppChannel {
    client: Client,
    config: WhatsAppConfig,
}

impl WhatsAppChannel {
    pub fn new(config: WhatsAppConfig) -> Result<Self, ChannelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChannelError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/{}/messages",
            self.config.api_base.trim_end_matches('/'),
            self.config.api_version,
            self.config.phone_number_id
        )
    }
}

#[async_trait]
impl MessagingChannelPort for WhatsAppChannel {
    async fn send_text(&self, to: &str, text: &str) -> Result<(), ChannelError> {
        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            to,
            kind: "text",
            text: TextBody { body: text },
        };

        tracing::debug!(to = %to, text_len = text.len(), "Sending WhatsApp message");

        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.config.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChannelError::Timeout
                } else if e.is_connect() {
                    ChannelError::NetworkError(format!("Cannot connect to channel API: {}", e))
                } else {
                    ChannelError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
