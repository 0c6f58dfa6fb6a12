//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::domain::{FanOutMode, RetryPolicy};
use crate::infrastructure::adapters::{RecipientRoute, WhatsAppConfig};

/// 应用主配置
///
/// 指令 API 服务与投递服务共用同一份配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 指令 API 服务
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 令牌与身份校验
    #[serde(default)]
    pub auth: AuthConfig,

    /// 投递提交方式
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// 投递服务与消息渠道
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/kitchen-relay.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 令牌配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// 访问令牌签名密钥
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// 访问令牌有效期（秒）
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    /// 外部 ID token 校验密钥
    #[serde(default = "default_identity_secret")]
    pub identity_secret: String,
}

pub(crate) const DEV_JWT_SECRET: &str = "dev-only-jwt-secret";
pub(crate) const DEV_IDENTITY_SECRET: &str = "dev-only-identity-secret";

fn default_jwt_secret() -> String {
    DEV_JWT_SECRET.to_string()
}

fn default_token_ttl() -> u64 {
    8 * 3600
}

fn default_identity_secret() -> String {
    DEV_IDENTITY_SECRET.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_secs: default_token_ttl(),
            identity_secret: default_identity_secret(),
        }
    }
}

/// 投递提交方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// POST 到独立的投递服务
    #[default]
    Http,
    /// 进程内运行 DeliveryWorker
    Embedded,
}

/// 投递提交配置
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub mode: DispatchMode,

    /// 投递服务 Base URL（http 模式）
    #[serde(default = "default_dispatch_url")]
    pub url: String,

    /// 提交请求超时（秒），需覆盖投递服务的全部重试
    #[serde(default = "default_dispatch_timeout")]
    pub timeout_secs: u64,
}

fn default_dispatch_url() -> String {
    "http://localhost:4500".to_string()
}

fn default_dispatch_timeout() -> u64 {
    60
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            mode: DispatchMode::default(),
            url: default_dispatch_url(),
            timeout_secs: default_dispatch_timeout(),
        }
    }
}

/// 投递服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// 投递服务监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 投递服务监听端口
    #[serde(default = "default_delivery_port")]
    pub port: u16,

    /// WhatsApp Cloud API 地址
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default)]
    pub phone_number_id: String,

    #[serde(default)]
    pub access_token: String,

    /// 单次渠道调用超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Webhook 订阅校验令牌
    #[serde(default)]
    pub webhook_verify_token: String,

    /// 每个收件人的最大尝试次数
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// 退避基数（毫秒）
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default)]
    pub fan_out: FanOutMode,

    /// 未配置路由时的收件人
    #[serde(default = "default_fallback_recipients")]
    pub fallback_recipients: Vec<String>,

    /// 按 (餐厅, 工位) 配置的收件人
    #[serde(default)]
    pub routes: Vec<RecipientRoute>,
}

fn default_delivery_port() -> u16 {
    4500
}

fn default_api_base() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_api_version() -> String {
    "v20.0".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_fallback_recipients() -> Vec<String> {
    vec!["15551234567".to_string()]
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_delivery_port(),
            api_base: default_api_base(),
            api_version: default_api_version(),
            phone_number_id: String::new(),
            access_token: String::new(),
            request_timeout_secs: default_request_timeout(),
            webhook_verify_token: String::new(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            fan_out: FanOutMode::default(),
            fallback_recipients: default_fallback_recipients(),
            routes: Vec::new(),
        }
    }
}

impl DeliveryConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }

    /// 单个任务在投递服务内的最长耗时
    ///
    /// 每个收件人 `max_attempts` 次渠道调用加退避；顺序模式按最大收件人列表累加
    pub fn worst_case_duration(&self) -> Duration {
        let retry = self.retry_policy();
        let per_recipient = Duration::from_secs(self.request_timeout_secs)
            .saturating_mul(retry.max_attempts)
            .saturating_add(retry.total_backoff());

        let recipients = match self.fan_out {
            FanOutMode::Sequential => self
                .routes
                .iter()
                .map(|route| route.recipients.len())
                .chain(std::iter::once(self.fallback_recipients.len()))
                .max()
                .unwrap_or(0),
            FanOutMode::Independent => 1,
        };

        per_recipient.saturating_mul(u32::try_from(recipients).unwrap_or(u32::MAX))
    }

    pub fn channel_config(&self) -> WhatsAppConfig {
        WhatsAppConfig {
            api_base: self.api_base.clone(),
            api_version: self.api_version.clone(),
            phone_number_id: self.phone_number_id.clone(),
            access_token: self.access_token.clone(),
            timeout_secs: self.request_timeout_secs,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
