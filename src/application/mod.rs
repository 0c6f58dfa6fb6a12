//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（审计日志、投递提交、消息渠道、令牌）
//! - commands: CQRS 命令及处理器（提交指令、状态回写、管理、令牌换取）
//! - queries: CQRS 查询及处理器（审计日志列表与导出）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    DeleteRestaurant, ExchangeIdToken, ExchangeIdTokenResponse, ReconcileDelivery, SubmitCommand,
    SubmitCommandResponse, UpsertRestaurant, UpsertUser,
    // Handlers
    handlers::{
        DeleteRestaurantHandler, ExchangeTokenHandler, ReconcileResult, StatusReconciler,
        SubmitCommandHandler, UpsertRestaurantHandler, UpsertUserHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Repositories
    CommandLogRecord,
    CommandLogRepositoryPort,
    LogFilter,
    NewCommandLog,
    RepositoryError,
    RestaurantRecord,
    RestaurantRepositoryPort,
    StatusUpdate,
    UpdateResult,
    UserRecord,
    UserRepositoryPort,
    // Dispatch
    DeliveryReport,
    DispatchClientPort,
    DispatchError,
    DispatchRequest,
    // Messaging
    ChannelError,
    MessagingChannelPort,
    RecipientDirectoryPort,
    // Identity
    IdentityError,
    IdentityVerifierPort,
    IssuedToken,
    TokenError,
    TokenServicePort,
};

pub use queries::{
    ExportCommandLogs, ListCommandLogs,
    // Handlers
    handlers::{render_csv, ExportCommandLogsHandler, ListCommandLogsHandler},
};
