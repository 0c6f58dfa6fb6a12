//! HTTP Routes
//!
//! 指令 API 服务:
//! - /health                   GET     健康检查
//! - /api/auth/exchange        POST    ID token 换取访问令牌
//! - /api/commands             POST    提交指令（GM、SuperAdmin）
//! - /api/logs                 GET     审计记录（Staff、GM、SuperAdmin）
//! - /api/logs/export          GET     导出 CSV（GM 及以上）
//! - /api/restaurants          POST    创建或更新餐厅（SuperAdmin）
//! - /api/restaurants/:id      DELETE  删除餐厅（SuperAdmin）
//! - /api/users                POST    创建或更新用户（SuperAdmin）
//!
//! 投递服务:
//! - /health                   GET     健康检查
//! - /dispatch                 POST    投递指令
//! - /webhook                  GET     订阅校验
//! - /webhook                  POST    入站事件确认

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::{AppState, DeliveryState};

/// 指令 API 服务路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/exchange", post(handlers::exchange_token))
        .route("/commands", post(handlers::submit_command))
        .route("/logs", get(handlers::list_logs))
        .route("/logs/export", get(handlers::export_logs))
        .route("/restaurants", post(handlers::upsert_restaurant))
        .route("/restaurants/:id", delete(handlers::delete_restaurant))
        .route("/users", post(handlers::upsert_user))
}

/// 投递服务路由
pub fn create_delivery_routes() -> Router<Arc<DeliveryState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/dispatch", post(handlers::dispatch))
        .route(
            "/webhook",
            get(handlers::verify_webhook).post(handlers::receive_webhook),
        )
}
