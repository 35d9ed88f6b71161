//! Speech Recognizer Port - 语音识别抽象
//!
//! 识别服务返回离散的结果码，由应用层决定如何降级

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 语音识别错误
#[derive(Debug, Error)]
pub enum SttError {
    #[error("Failed to read audio file: {0}")]
    AudioRead(String),

    #[error("Unsupported audio: {0}")]
    InvalidAudio(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 识别结果码
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// 识别成功
    Recognized(String),
    /// 有语音但无法匹配
    NoMatch,
    /// 开头只有静音
    InitialSilenceTimeout,
    /// 只有噪声
    BabbleTimeout,
    /// 识别服务内部错误
    Error(String),
}

impl RecognitionOutcome {
    /// 从 Azure 短音频 REST 的 `RecognitionStatus` 字段解析
    pub fn from_status(status: &str, display_text: Option<String>) -> Self {
        match status {
            "Success" => Self::Recognized(display_text.unwrap_or_default()),
            "NoMatch" => Self::NoMatch,
            "InitialSilenceTimeout" => Self::InitialSilenceTimeout,
            "BabbleTimeout" => Self::BabbleTimeout,
            other => Self::Error(other.to_string()),
        }
    }
}

/// Speech Recognizer Port
#[async_trait]
pub trait SpeechRecognizerPort: Send + Sync {
    /// 对本地音频文件做一次识别
    async fn recognize(&self, audio_path: &Path) -> Result<RecognitionOutcome, SttError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_status() {
        assert_eq!(
            RecognitionOutcome::from_status("Success", Some("hi".to_string())),
            RecognitionOutcome::Recognized("hi".to_string())
        );
        assert_eq!(
            RecognitionOutcome::from_status("NoMatch", None),
            RecognitionOutcome::NoMatch
        );
        assert_eq!(
            RecognitionOutcome::from_status("Error", None),
            RecognitionOutcome::Error("Error".to_string())
        );
    }
}
