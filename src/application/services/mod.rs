//! 应用层 - 流水线各阶段服务
//!
//! 每个服务只包一次外部调用，外加本阶段的策略（降级、过滤、取值）

mod query_executor;
mod query_synthesizer;
mod speech_synthesizer;
mod summarizer;
mod transcriber;

pub use query_executor::QueryExecutor;
pub use query_synthesizer::{QuerySynthesizer, DEFAULT_QUERY_TEMPERATURE};
pub use speech_synthesizer::SpeechSynthesizer;
pub use summarizer::{Summarizer, DEFAULT_SUMMARY_TEMPERATURE};
pub use transcriber::Transcriber;
