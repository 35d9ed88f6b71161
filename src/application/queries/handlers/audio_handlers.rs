//! Audio Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::AudioStoragePort;
use crate::application::queries::audio_queries::{GetAudioQuery, GetAudioResponse};

/// GetAudio Handler - 读取已合成的音频
pub struct GetAudioHandler {
    audio_storage: Arc<dyn AudioStoragePort>,
}

impl GetAudioHandler {
    pub fn new(audio_storage: Arc<dyn AudioStoragePort>) -> Self {
        Self { audio_storage }
    }

    pub async fn handle(&self, query: GetAudioQuery) -> Result<GetAudioResponse, ApplicationError> {
        let audio_data = self.audio_storage.read_audio(&query.filename).await?;

        Ok(GetAudioResponse {
            audio_data,
            content_type: "audio/wav".to_string(),
        })
    }
}
