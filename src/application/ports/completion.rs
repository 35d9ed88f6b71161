//! Completion Port - 语言模型补全抽象

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// 补全错误
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 对话消息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// 补全请求：单轮、单候选
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

impl CompletionRequest {
    /// 单条 user 消息的请求
    pub fn single_turn(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            temperature,
        }
    }
}

/// Completion Port
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// 返回第一个候选的原始文本（不做 trim）
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
