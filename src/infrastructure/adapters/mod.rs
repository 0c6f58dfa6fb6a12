//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod auth;
pub mod dispatch;
pub mod messaging;

pub use auth::*;
pub use dispatch::*;
pub use messaging::*;
