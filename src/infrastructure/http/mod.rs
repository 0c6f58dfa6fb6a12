//! HTTP Layer - 指令 API 服务与投递服务

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::{create_delivery_routes, create_routes};
pub use server::{shutdown_signal, HttpServer, ServerConfig};
pub use state::{AppState, DeliveryState};
