//! SQLite Persistence - SQLite 数据库持久化实现

mod command_log_repo;
mod database;
mod restaurant_repo;
mod user_repo;

pub use command_log_repo::*;
pub use database::*;
pub use restaurant_repo::*;
pub use user_repo::*;
