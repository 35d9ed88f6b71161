//! Speech Synthesizer - 文本转语音并落盘

use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{AudioStoragePort, SynthesisRequest, TtsEnginePort};

pub struct SpeechSynthesizer {
    tts_engine: Arc<dyn TtsEnginePort>,
    audio_storage: Arc<dyn AudioStoragePort>,
}

impl SpeechSynthesizer {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>, audio_storage: Arc<dyn AudioStoragePort>) -> Self {
        Self {
            tts_engine,
            audio_storage,
        }
    }

    /// 随机文件名：32 位十六进制 UUID + `.wav`
    fn generate_filename() -> String {
        format!("{}.wav", Uuid::new_v4().simple())
    }

    /// 合成音频并保存，返回文件名（不含目录）
    pub async fn synthesize(&self, text: &str) -> Result<String, ApplicationError> {
        let filename = Self::generate_filename();

        let response = self
            .tts_engine
            .synthesize(SynthesisRequest {
                text: text.to_string(),
            })
            .await?;

        let path = self
            .audio_storage
            .save_audio(&filename, &response.audio_data)
            .await?;

        tracing::info!(
            filename = %filename,
            path = %path.display(),
            size = response.audio_data.len(),
            request_id = ?response.request_id,
            "Speech synthesized"
        );
        Ok(filename)
    }
}
