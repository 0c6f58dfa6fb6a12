//! Kitchen Relay - 投递服务
//!
//! 接收 /dispatch 请求，经 WhatsApp Cloud API 投递并同步返回结果

use std::sync::Arc;

use kitchen_relay::config::{load_config, print_config};
use kitchen_relay::infrastructure::adapters::{StaticRecipientDirectory, WhatsAppChannel};
use kitchen_relay::infrastructure::http::{
    create_delivery_routes, shutdown_signal, DeliveryState, HttpServer, ServerConfig,
};
use kitchen_relay::infrastructure::worker::{DeliveryWorker, DeliveryWorkerConfig};
use kitchen_relay::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Kitchen Relay - delivery service");
    print_config(&config);

    let delivery = &config.delivery;
    if delivery.access_token.is_empty() || delivery.phone_number_id.is_empty() {
        tracing::warn!("Channel credentials are not configured, every send will be rejected");
    }

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

    let state = DeliveryState::new(worker, delivery.webhook_verify_token.clone());

    let server = HttpServer::new(
        "delivery service",
        ServerConfig::new(&delivery.host, delivery.port),
        create_delivery_routes().with_state(Arc::new(state)),
    );

    server.run_with_shutdown(shutdown_signal()).await?;

    Ok(())
}
