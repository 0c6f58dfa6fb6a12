//! Kitchen Relay - 指令 API 服务
//!
//! 接收操作员指令，写审计记录，提交投递并回写投递结果

use std::sync::Arc;

use kitchen_relay::application::{DeliveryReport, DispatchClientPort, StatusReconciler};
use kitchen_relay::config::{load_config, print_config, AppConfig, DispatchMode};
use kitchen_relay::domain::CommandParser;
use kitchen_relay::infrastructure::adapters::{
    HttpDispatchClient, JwtIdentityVerifier, JwtTokenService, LocalDispatchClient,
    StaticRecipientDirectory, WhatsAppChannel,
};
use kitchen_relay::infrastructure::http::{
    create_routes, shutdown_signal, AppState, HttpServer, ServerConfig,
};
use kitchen_relay::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteCommandLogRepository,
    SqliteRestaurantRepository, SqliteUserRepository,
};
use kitchen_relay::infrastructure::worker::{
    DeliveryWorker, DeliveryWorkerConfig, ReconcileWorker, REPORT_CHANNEL_CAPACITY,
};
use kitchen_relay::logging::init_tracing;
use std::time::Duration;
use tokio::sync::mpsc;

/// 关闭时等待投递结果回写的上限
const RECONCILE_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Kitchen Relay - command API");
    print_config(&config);

    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let audit_log = Arc::new(SqliteCommandLogRepository::new(pool.clone()));
    let restaurant_repo = Arc::new(SqliteRestaurantRepository::new(pool.clone()));
    let user_repo = Arc::new(SqliteUserRepository::new(pool));

    // 投递结果通道 → ReconcileWorker
    let (report_tx, report_rx) = mpsc::channel(REPORT_CHANNEL_CAPACITY);
    let reconciler = Arc::new(StatusReconciler::new(audit_log.clone()));
    let reconcile_handle = tokio::spawn(ReconcileWorker::new(report_rx, reconciler).run());

    let dispatch_client = build_dispatch_client(&config, report_tx)?;

    let state = AppState::new(
        Arc::new(CommandParser::default()),
        audit_log,
        restaurant_repo,
        user_repo,
        dispatch_client,
        Arc::new(JwtTokenService::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_secs,
        )),
        Arc::new(JwtIdentityVerifier::new(&config.auth.identity_secret)),
    );

    let server = HttpServer::new(
        "command API",
        ServerConfig::new(&config.server.host, config.server.port),
        create_routes().with_state(Arc::new(state)),
    );

    server.run_with_shutdown(shutdown_signal()).await?;

    // Router 释放后发送端随进行中的投递结束而关闭
    if tokio::time::timeout(RECONCILE_DRAIN_TIMEOUT, reconcile_handle)
        .await
        .is_err()
    {
        tracing::warn!("Pending delivery reports dropped at shutdown");
    }
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 按配置选择投递提交方式
fn build_dispatch_client(
    config: &AppConfig,
    reports: mpsc::Sender<DeliveryReport>,
) -> anyhow::Result<Arc<dyn DispatchClientPort>> {
    match config.dispatch.mode {
        DispatchMode::Http => Ok(Arc::new(HttpDispatchClient::new(
            &config.dispatch.url,
            config.dispatch.timeout_secs,
            reports,
        )?)),
        DispatchMode::Embedded => {
            let delivery = &config.delivery;
            let channel = WhatsAppChannel::new(delivery.channel_config())?;
            let directory = StaticRecipientDirectory::new(
                delivery.routes.clone(),
                delivery.fallback_recipients.clone(),
            );
            let worker = DeliveryWorker::new(
                DeliveryWorkerConfig {
                    retry: delivery.retry_policy(),
                    fan_out: delivery.fan_out,
                },
                Arc::new(channel),
                Arc::new(directory),
            );
            Ok(Arc::new(LocalDispatchClient::new(worker, reports)))
        }
    }
}
