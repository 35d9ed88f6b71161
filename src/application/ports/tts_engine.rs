//! TTS Engine Port - 语音合成引擎抽象
//!
//! 定义 TTS 合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// TTS 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本内容
    pub text: String,
}

/// TTS 合成响应
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// WAV 音频数据
    pub audio_data: Vec<u8>,
    /// 服务端请求 ID（用于追踪）
    pub request_id: Option<String>,
}

/// TTS Engine Port
///
/// 外部 TTS 服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 把文本合成为 WAV 音频
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError>;
}
