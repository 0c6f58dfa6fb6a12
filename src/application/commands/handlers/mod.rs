//! Command Handlers

mod admin_handlers;
mod auth_handlers;
mod reconcile_handlers;
mod submit_handlers;

pub use admin_handlers::*;
pub use auth_handlers::*;
pub use reconcile_handlers::*;
pub use submit_handlers::*;
