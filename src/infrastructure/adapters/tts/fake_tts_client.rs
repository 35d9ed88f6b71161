//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 返回一段静音 WAV，不实际调用 TTS 服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 静音时长（毫秒）
    pub duration_ms: u64,
    /// 采样率
    pub sample_rate: u32,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            duration_ms: 200,
            sample_rate: 16000,
        }
    }
}

/// Fake TTS Client
///
/// 始终返回同一段 16bit 单声道静音，并记录调用次数和最后一次文本
pub struct FakeTtsClient {
    audio_data: Vec<u8>,
    calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        Self {
            audio_data: silent_wav(&config),
            calls: AtomicUsize::new(0),
            last_text: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().ok().and_then(|t| t.clone())
    }
}

impl Default for FakeTtsClient {
    fn default() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }
}

/// 生成 PCM WAV：44 字节头 + 全零样本
fn silent_wav(config: &FakeTtsClientConfig) -> Vec<u8> {
    let samples = config.sample_rate as u64 * config.duration_ms / 1000;
    let data_len = (samples * 2) as u32;
    let byte_rate = config.sample_rate * 2;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&config.sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(44 + data_len as usize, 0);
    wav
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        tracing::debug!(text_len = request.text.len(), "FakeTtsClient: returning silent audio");

        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_text.lock() {
            *last = Some(request.text);
        }

        Ok(SynthesisResponse {
            audio_data: self.audio_data.clone(),
            request_id: Some(format!("fake-{}", uuid::Uuid::new_v4())),
        })
    }
}
