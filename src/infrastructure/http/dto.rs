//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::VoiceQueryResult;

/// 合成音频的公开路径前缀
pub const AUDIO_URL_PREFIX: &str = "/static/audio";

/// `POST /api/voice-query` 响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceQueryResponse {
    pub spoken_text: String,
    pub kql: String,
    pub summary: String,
    /// 未识别时为空字符串
    pub audio_url: String,
}

impl From<VoiceQueryResult> for VoiceQueryResponse {
    fn from(result: VoiceQueryResult) -> Self {
        let audio_url = result
            .audio_filename
            .map(|f| format!("{}/{}", AUDIO_URL_PREFIX, f))
            .unwrap_or_default();

        Self {
            spoken_text: result.spoken_text,
            kql: result.kql,
            summary: result.summary,
            audio_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_url_from_filename() {
        let response = VoiceQueryResponse::from(VoiceQueryResult {
            spoken_text: "wind".to_string(),
            kql: "print 1".to_string(),
            summary: "One.".to_string(),
            audio_filename: Some("abc.wav".to_string()),
        });
        assert_eq!(response.audio_url, "/static/audio/abc.wav");
    }

    #[test]
    fn test_unrecognized_serializes_empty_fields() {
        let response = VoiceQueryResponse::from(VoiceQueryResult::not_recognized());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "spoken_text": "",
                "kql": "",
                "summary": "Speech not recognized.",
                "audio_url": ""
            })
        );
    }
}
