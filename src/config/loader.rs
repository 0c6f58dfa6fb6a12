//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::types::{AppConfig, DispatchMode, DEV_IDENTITY_SECRET, DEV_JWT_SECRET};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `RELAY_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `RELAY_SERVER__PORT=4000`
/// - `RELAY_AUTH__JWT_SECRET=...`
/// - `RELAY_DISPATCH__MODE=embedded`
/// - `RELAY_DELIVERY__ACCESS_TOKEN=...`
/// - `RELAY_DELIVERY__FALLBACK_RECIPIENTS=15551234567,15557654321`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 4000)?
        .set_default("database.path", "data/kitchen-relay.db")?
        .set_default("database.max_connections", 5)?
        .set_default("auth.token_ttl_secs", 8 * 3600)?
        .set_default("dispatch.mode", "http")?
        .set_default("dispatch.url", "http://localhost:4500")?
        .set_default("dispatch.timeout_secs", 60)?
        .set_default("delivery.host", "0.0.0.0")?
        .set_default("delivery.port", 4500)?
        .set_default("delivery.max_attempts", 3)?
        .set_default("delivery.base_delay_ms", 500)?
        .set_default("delivery.fan_out", "sequential")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("RELAY")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("delivery.fallback_recipients")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 || config.delivery.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.auth.jwt_secret.is_empty() || config.auth.identity_secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "Auth secrets cannot be empty".to_string(),
        ));
    }

    if config.auth.token_ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Token TTL cannot be 0".to_string(),
        ));
    }

    if config.dispatch.mode == DispatchMode::Http && config.dispatch.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Dispatch URL cannot be empty in http mode".to_string(),
        ));
    }

    if config.delivery.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "Delivery max attempts cannot be 0".to_string(),
        ));
    }

    if config.delivery.fallback_recipients.is_empty() {
        return Err(ConfigError::ValidationError(
            "Fallback recipients cannot be empty".to_string(),
        ));
    }

    // 提交超时短于投递耗时会丢失失败结果
    if config.dispatch.mode == DispatchMode::Http {
        let worst_case = config.delivery.worst_case_duration();
        if Duration::from_secs(config.dispatch.timeout_secs) < worst_case {
            return Err(ConfigError::ValidationError(format!(
                "Dispatch timeout {}s is shorter than worst-case delivery {}s",
                config.dispatch.timeout_secs,
                worst_case.as_secs_f64().ceil() as u64
            )));
        }
    }

    Ok(())
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("JWT Secret: {}", redact(&config.auth.jwt_secret));
    tracing::info!("Token TTL: {}s", config.auth.token_ttl_secs);
    tracing::info!("Dispatch Mode: {:?}", config.dispatch.mode);
    if config.dispatch.mode == DispatchMode::Http {
        tracing::info!("Dispatch URL: {}", config.dispatch.url);
    }
    tracing::info!("Delivery Server: {}", config.delivery.addr());
    tracing::info!("Channel API: {}/{}", config.delivery.api_base, config.delivery.api_version);
    tracing::info!("Channel Access Token: {}", redact(&config.delivery.access_token));
    tracing::info!(
        "Retry: {} attempts, base delay {}ms",
        config.delivery.max_attempts,
        config.delivery.base_delay_ms
    );
    tracing::info!("Fan-out: {:?}", config.delivery.fan_out);
    tracing::info!("Recipient Routes: {}", config.delivery.routes.len());
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");

    if config.auth.jwt_secret == DEV_JWT_SECRET || config.auth.identity_secret == DEV_IDENTITY_SECRET {
        tracing::warn!("Using built-in development secrets, set RELAY_AUTH__* before deploying");
    }
}
