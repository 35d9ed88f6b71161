//! Azure STT Client - 调用 Azure Speech 短音频识别 REST 服务
//!
//! 外部 STT API:
//! POST https://{region}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1?language=en-US&format=simple
//! Request: 16kHz 单声道 16 位 PCM WAV（上传音频先经 `wav_normalizer` 转换）
//! Response: {"RecognitionStatus": "Success", "DisplayText": "..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::wav_normalizer::normalize_for_recognition;
use crate::application::ports::{RecognitionOutcome, SpeechRecognizerPort, SttError};

/// 订阅 key 的 header 名
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// 短音频 REST 只接受 16kHz 单声道 PCM WAV
const AUDIO_CONTENT_TYPE: &str = "audio/wav; codecs=audio/pcm; samplerate=16000";

/// 识别响应 (format=simple)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: String,
    #[serde(default)]
    display_text: Option<String>,
}

/// Azure STT 客户端配置
#[derive(Debug, Clone)]
pub struct AzureSttClientConfig {
    /// 识别 URL（不含查询参数）
    pub endpoint: String,
    /// Speech 资源订阅 key
    pub subscription_key: String,
    /// 识别语言
    pub language: String,
    /// 请求超时时间（秒），0 表示使用 HTTP 客户端默认值
    pub timeout_secs: u64,
}

impl AzureSttClientConfig {
    pub fn new(endpoint: impl Into<String>, subscription_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            subscription_key: subscription_key.into(),
            language: "en-US".to_string(),
            timeout_secs: 0,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Azure STT 客户端
pub struct AzureSttClient {
    client: Client,
    config: AzureSttClientConfig,
}

impl AzureSttClient {
    pub fn new(config: AzureSttClientConfig) -> Result<Self, SttError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| SttError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SpeechRecognizerPort for AzureSttClient {
    async fn recognize(&self, audio_path: &Path) -> Result<RecognitionOutcome, SttError> {
        let audio = tokio::fs::read(audio_path)
            .await
            .map_err(|e| SttError::AudioRead(format!("{}: {}", audio_path.display(), e)))?;
        let uploaded_bytes = audio.len();

        // 解码和重采样是 CPU 密集操作
        let audio = tokio::task::spawn_blocking(move || normalize_for_recognition(&audio))
            .await
            .map_err(|e| SttError::InvalidAudio(format!("normalization task failed: {}", e)))??;

        tracing::debug!(
            url = %self.config.endpoint,
            language = %self.config.language,
            uploaded_bytes,
            audio_bytes = audio.len(),
            "Sending STT request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("language", self.config.language.as_str()), ("format", "simple")])
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.subscription_key)
            .header(reqwest::header::CONTENT_TYPE, AUDIO_CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, "application/json")
            .body(audio)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SttError::Timeout
                } else {
                    SttError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SttError::ServiceError(format!("HTTP {}: {}", status, error_text)));
        }

        let body: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| SttError::InvalidResponse(e.to_string()))?;

        tracing::debug!(status = %body.recognition_status, "STT response received");

        Ok(RecognitionOutcome::from_status(
            &body.recognition_status,
            body.display_text,
        ))
    }
}
