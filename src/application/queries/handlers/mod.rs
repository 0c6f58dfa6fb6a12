//! Query Handlers 实现

mod log_handlers;

pub use log_handlers::*;
