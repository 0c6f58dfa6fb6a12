//! 日志初始化
//!
//! `RUST_LOG` 优先于配置中的 `log.level`

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// 初始化全局 tracing subscriber
pub fn init_tracing(config: &LogConfig) {
    let default_filter = format!(
        "{},kitchen_relay={},tower_http=debug",
        config.level, config.level
    );
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&default_filter));

    if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
