//! Voice Query Commands

use std::path::PathBuf;

use crate::domain::voice_query::{VoiceQuery, UNRECOGNIZED_SUMMARY};

/// 对一段已落盘的上传音频执行完整流水线
#[derive(Debug, Clone)]
pub struct RunVoiceQuery {
    pub audio_path: PathBuf,
}

/// 流水线结果
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceQueryResult {
    pub spoken_text: String,
    pub kql: String,
    pub summary: String,
    /// 未识别时为 `None`
    pub audio_filename: Option<String>,
}

impl VoiceQueryResult {
    /// 语音未识别的降级结果
    pub fn not_recognized() -> Self {
        Self {
            spoken_text: String::new(),
            kql: String::new(),
            summary: UNRECOGNIZED_SUMMARY.to_string(),
            audio_filename: None,
        }
    }

    /// 从已完成的 VoiceQuery 构造
    pub fn from_completed(query: &VoiceQuery) -> Self {
        Self {
            spoken_text: query.spoken_text().unwrap_or_default().to_string(),
            kql: query.query().map(|q| q.as_str().to_string()).unwrap_or_default(),
            summary: query.summary().unwrap_or_default().to_string(),
            audio_filename: query.audio_filename().map(|s| s.to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.audio_filename.is_some()
    }
}
