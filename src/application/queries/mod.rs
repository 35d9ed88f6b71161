//! 应用层 - 查询（只读操作）

mod audio_queries;

pub mod handlers;

pub use audio_queries::*;
