//! Azure TTS Client - 调用 Azure Speech 文本转语音 REST 服务
//!
//! 实现 TtsEnginePort trait
//!
//! 外部 TTS API:
//! POST https://{region}.tts.speech.microsoft.com/cognitiveservices/v1
//! Request: SSML (application/ssml+xml)
//! Response: audio/wav binary，请求 ID 在 `X-RequestId` header

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

/// 订阅 key 的 header 名
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Azure TTS 客户端配置
#[derive(Debug, Clone)]
pub struct AzureTtsClientConfig {
    /// 完整的合成 URL
    pub endpoint: String,
    /// Speech 资源订阅 key
    pub subscription_key: String,
    /// 语言，如 `en-US`
    pub language: String,
    /// 神经语音名称，如 `en-US-JennyNeural`
    pub voice: String,
    /// 输出格式
    pub output_format: String,
    /// 请求超时时间（秒），0 表示使用 HTTP 客户端默认值
    pub timeout_secs: u64,
}

impl AzureTtsClientConfig {
    pub fn new(endpoint: impl Into<String>, subscription_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            subscription_key: subscription_key.into(),
            language: "en-US".to_string(),
            voice: "en-US-JennyNeural".to_string(),
            output_format: "riff-24khz-16bit-mono-pcm".to_string(),
            timeout_secs: 0,
        }
    }

    pub fn with_voice(mut self, language: impl Into<String>, voice: impl Into<String>) -> Self {
        self.language = language.into();
        self.voice = voice.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Azure TTS 客户端
pub struct AzureTtsClient {
    client: Client,
    config: AzureTtsClientConfig,
}

impl AzureTtsClient {
    /// 创建新的 Azure TTS 客户端
    pub fn new(config: AzureTtsClientConfig) -> Result<Self, TtsError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 构造 SSML 请求体
    fn build_ssml(&self, text: &str) -> String {
        format!(
            "<speak version='1.0' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
            self.config.language,
            self.config.voice,
            escape_xml(text)
        )
    }
}

/// 转义 XML 特殊字符
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[async_trait]
impl TtsEnginePort for AzureTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let ssml = self.build_ssml(&request.text);

        tracing::debug!(
            url = %self.config.endpoint,
            text_len = request.text.len(),
            voice = %self.config.voice,
            "Sending TTS request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.subscription_key)
            .header(reqwest::header::CONTENT_TYPE, "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", &self.config.output_format)
            .header(reqwest::header::USER_AGENT, concat!("windtalk/", env!("CARGO_PKG_VERSION")))
            .body(ssml)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let request_id = response
            .headers()
            .get("X-RequestId")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(TtsError::InvalidResponse("Empty audio body".to_string()));
        }

        tracing::info!(
            request_id = ?request_id,
            audio_size = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesisResponse {
            audio_data,
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, routing::post, Router};
    use tokio::net::TcpListener;

    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_config_builder() {
        let config = AzureTtsClientConfig::new("http://example.com/tts", "key")
            .with_voice("en-GB", "en-GB-SoniaNeural")
            .with_timeout(30);
        assert_eq!(config.voice, "en-GB-SoniaNeural");
        assert_eq!(config.language, "en-GB");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_ssml_escapes_text() {
        let client = AzureTtsClient::new(AzureTtsClientConfig::new("http://localhost", "key")).unwrap();
        let ssml = client.build_ssml("Power < 5 & falling");
        assert_eq!(
            ssml,
            "<speak version='1.0' xml:lang='en-US'><voice name='en-US-JennyNeural'>Power &lt; 5 &amp; falling</voice></speak>"
        );
    }

    #[tokio::test]
    async fn test_synthesize_returns_audio() {
        let router = Router::new().route(
            "/cognitiveservices/v1",
            post(|headers: HeaderMap, body: String| async move {
                assert_eq!(headers[SUBSCRIPTION_KEY_HEADER], "secret");
                assert_eq!(headers["X-Microsoft-OutputFormat"], "riff-24khz-16bit-mono-pcm");
                assert!(body.contains("Hello there"));
                ([("X-RequestId", "req-1")], b"RIFFdata".to_vec())
            }),
        );
        let base = spawn_server(router).await;
        let client = AzureTtsClient::new(AzureTtsClientConfig::new(
            format!("{}/cognitiveservices/v1", base),
            "secret",
        ))
        .unwrap();

        let response = client
            .synthesize(SynthesisRequest {
                text: "Hello there".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.audio_data, b"RIFFdata");
        assert_eq!(response.request_id.as_deref(), Some("req-1"));
    }

    #[tokio::test]
    async fn test_service_error_is_reported() {
        let router = Router::new().route(
            "/cognitiveservices/v1",
            post(|| async { (axum::http::StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let base = spawn_server(router).await;
        let client = AzureTtsClient::new(AzureTtsClientConfig::new(
            format!("{}/cognitiveservices/v1", base),
            "wrong",
        ))
        .unwrap();

        let err = client
            .synthesize(SynthesisRequest {
                text: "hi".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::ServiceError(msg) if msg.contains("401")));
    }
}
