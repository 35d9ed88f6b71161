//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_storage;
mod completion;
mod speech_recognizer;
mod telemetry_store;
mod tts_engine;

pub use audio_storage::{
    validate_audio_filename, AudioStorageError, AudioStoragePort, StorageStats,
};
pub use completion::{ChatMessage, CompletionError, CompletionPort, CompletionRequest};
pub use speech_recognizer::{RecognitionOutcome, SpeechRecognizerPort, SttError};
pub use telemetry_store::{
    ResultColumn, ResultTable, TelemetryError, TelemetryStorePort,
};
pub use tts_engine::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};
