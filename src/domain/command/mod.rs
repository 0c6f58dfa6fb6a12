//! Command Context - 指令限界上下文
//!
//! 职责:
//! - 操作员指令语法解析
//! - 目标工位同义词归一化
//! - 审计状态定义

mod parser;
mod value_objects;

pub use parser::{CommandParser, SynonymTable, SyntaxError};
pub use value_objects::{Command, CommandStatus};
