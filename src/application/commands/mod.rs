//! 应用层 - 命令
//!
//! 语音查询流水线

mod voice_query_commands;

pub mod handlers;

pub use voice_query_commands::*;
