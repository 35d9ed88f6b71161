//! Voice Query Context - 单次语音查询
//!
//! 职责:
//! - 记录一次请求在流水线中各阶段的产出
//! - 保证阶段按顺序推进

mod aggregate;
mod errors;

pub use aggregate::{PipelineStage, VoiceQuery, UNRECOGNIZED_SUMMARY};
pub use errors::VoiceQueryError;
