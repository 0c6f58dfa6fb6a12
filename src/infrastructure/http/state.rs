//! Application State
//!
//! 指令 API 服务与投递服务各自的共享状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    DeleteRestaurantHandler, ExchangeTokenHandler, SubmitCommandHandler, UpsertRestaurantHandler,
    UpsertUserHandler,
    // Query handlers
    ExportCommandLogsHandler, ListCommandLogsHandler,
    // Ports
    CommandLogRepositoryPort, DispatchClientPort, IdentityVerifierPort, RestaurantRepositoryPort,
    TokenServicePort, UserRepositoryPort,
};
use crate::domain::CommandParser;
use crate::infrastructure::worker::DeliveryWorker;

/// 指令 API 服务状态
pub struct AppState {
    // ========== Ports ==========
    pub token_service: Arc<dyn TokenServicePort>,

    // ========== Command Handlers ==========
    pub submit_command_handler: SubmitCommandHandler,
    pub exchange_token_handler: ExchangeTokenHandler,
    pub upsert_restaurant_handler: UpsertRestaurantHandler,
    pub delete_restaurant_handler: DeleteRestaurantHandler,
    pub upsert_user_handler: UpsertUserHandler,

    // ========== Query Handlers ==========
    pub list_logs_handler: ListCommandLogsHandler,
    pub export_logs_handler: ExportCommandLogsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        parser: Arc<CommandParser>,
        audit_log: Arc<dyn CommandLogRepositoryPort>,
        restaurant_repo: Arc<dyn RestaurantRepositoryPort>,
        user_repo: Arc<dyn UserRepositoryPort>,
        dispatch_client: Arc<dyn DispatchClientPort>,
        token_service: Arc<dyn TokenServicePort>,
        identity_verifier: Arc<dyn IdentityVerifierPort>,
    ) -> Self {
        Self {
            token_service: token_service.clone(),

            submit_command_handler: SubmitCommandHandler::new(
                parser,
                audit_log.clone(),
                dispatch_client,
            ),
            exchange_token_handler: ExchangeTokenHandler::new(
                identity_verifier,
                user_repo.clone(),
                token_service,
            ),
            upsert_restaurant_handler: UpsertRestaurantHandler::new(restaurant_repo.clone()),
            delete_restaurant_handler: DeleteRestaurantHandler::new(restaurant_repo),
            upsert_user_handler: UpsertUserHandler::new(user_repo),

            list_logs_handler: ListCommandLogsHandler::new(audit_log.clone()),
            export_logs_handler: ExportCommandLogsHandler::new(audit_log),
        }
    }
}

/// 投递服务状态
pub struct DeliveryState {
    pub worker: DeliveryWorker,
    pub webhook_verify_token: String,
}

impl DeliveryState {
    pub fn new(worker: DeliveryWorker, webhook_verify_token: impl Into<String>) -> Self {
        Self {
            worker,
            webhook_verify_token: webhook_verify_token.into(),
        }
    }
}
