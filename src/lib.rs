//! Kitchen Relay - 餐厅厨房指令中继
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Command Context: 指令语法解析与审计状态
//! - Access Context: 角色与访问守卫
//! - Delivery Context: 投递任务、结果与重试策略
//!
//! 应用层 (application/):
//! - Ports: 端口定义（审计日志、投递提交、消息渠道、令牌）
//! - Commands: 提交指令、状态回写、管理、令牌换取
//! - Queries: 审计日志列表与导出
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 指令 API 服务 + 投递服务
//! - Worker: DeliveryWorker 投递重试，ReconcileWorker 结果回写
//! - Persistence: SQLite 存储
//! - Adapters: WhatsApp 渠道、收件人目录、投递客户端、JWT

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{load_config, AppConfig};
