//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod admin_commands;
mod auth_commands;
mod dispatch_commands;

pub mod handlers;

pub use admin_commands::*;
pub use auth_commands::*;
pub use dispatch_commands::*;
