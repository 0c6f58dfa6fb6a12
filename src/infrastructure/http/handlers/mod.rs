//! HTTP Handlers

mod admin;
mod auth;
mod commands;
mod dispatch;
mod health;
mod logs;
mod webhook;

pub use admin::*;
pub use auth::*;
pub use commands::*;
pub use dispatch::*;
pub use health::*;
pub use logs::*;
pub use webhook::*;
