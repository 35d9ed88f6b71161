//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Telemetry Context: 遥测表结构、KQL 提示词与查询黑名单
//! - Voice Query Context: 单次语音查询的流水线状态

pub mod telemetry;
pub mod voice_query;
