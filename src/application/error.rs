//! 应用层错误定义
//!
//! 统一的流水线错误类型。识别失败和黑名单命中在本地恢复，不会出现在这里

use thiserror::Error;

use crate::application::ports::{AudioStorageError, CompletionError, TelemetryError, TtsError};
use crate::domain::voice_query::VoiceQueryError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 外部服务错误
    #[error("External service error ({service}): {message}")]
    ExternalServiceError {
        service: &'static str,
        message: String,
    },

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建外部服务错误
    pub fn external(service: &'static str, message: impl Into<String>) -> Self {
        Self::ExternalServiceError {
            service,
            message: message.into(),
        }
    }
}

impl From<CompletionError> for ApplicationError {
    fn from(err: CompletionError) -> Self {
        Self::external("completion", err.to_string())
    }
}

impl From<TelemetryError> for ApplicationError {
    fn from(err: TelemetryError) -> Self {
        Self::external("telemetry", err.to_string())
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        Self::external("tts", err.to_string())
    }
}

impl From<AudioStorageError> for ApplicationError {
    fn from(err: AudioStorageError) -> Self {
        match err {
            AudioStorageError::FileNotFound(name) => Self::not_found("Audio", name),
            AudioStorageError::InvalidName(name) => {
                Self::validation(format!("Invalid audio file name: {}", name))
            }
            other => Self::StorageError(other.to_string()),
        }
    }
}

impl From<VoiceQueryError> for ApplicationError {
    fn from(err: VoiceQueryError) -> Self {
        Self::InvalidState(err.to_string())
    }
}
