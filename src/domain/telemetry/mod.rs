//! Telemetry Context - 风机遥测查询上下文
//!
//! 职责:
//! - KQL 提示词模板
//! - 模型输出的关键字黑名单
//! - 查询结果标量值

mod kql_guard;
mod prompts;
mod value_objects;

pub use kql_guard::{contains_forbidden_keyword, sanitize_completion, FALLBACK_QUERY, FORBIDDEN_KEYWORDS};
pub use prompts::{build_kql_prompt, build_summary_prompt, TELEMETRY_COLUMNS, TELEMETRY_TABLE};
pub use value_objects::{KqlQuery, ScalarValue};
