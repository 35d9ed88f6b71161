//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechRecognizer、Completion、TelemetryStore、TtsEngine、AudioStorage）
//! - services: 流水线各阶段服务
//! - commands: 语音查询流水线命令及处理器
//! - queries: 音频读取查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use commands::{handlers::VoiceQueryHandler, RunVoiceQuery, VoiceQueryResult};

pub use error::ApplicationError;

pub use ports::{
    // Audio storage
    AudioStorageError,
    AudioStoragePort,
    StorageStats,
    // Completion
    ChatMessage,
    CompletionError,
    CompletionPort,
    CompletionRequest,
    // Speech recognizer
    RecognitionOutcome,
    SpeechRecognizerPort,
    SttError,
    // Telemetry store
    ResultColumn,
    ResultTable,
    TelemetryError,
    TelemetryStorePort,
    // TTS engine
    SynthesisRequest,
    SynthesisResponse,
    TtsEnginePort,
    TtsError,
};

pub use queries::{handlers::GetAudioHandler, GetAudioQuery, GetAudioResponse};

pub use services::{QueryExecutor, QuerySynthesizer, SpeechSynthesizer, Summarizer, Transcriber};
