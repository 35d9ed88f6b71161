//! Voice Query Context - Aggregate Root

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::VoiceQueryError;
use crate::domain::telemetry::{KqlQuery, ScalarValue};

/// 语音未识别时返回的固定摘要
pub const UNRECOGNIZED_SUMMARY: &str = "Speech not recognized.";

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Received,
    Transcribed,
    QuerySynthesized,
    Executed,
    Summarized,
    SpeechSynthesized,
}

/// VoiceQuery 聚合根
///
/// 不变量:
/// - 字段严格按流水线顺序写入，每个字段只写一次
/// - 只存在于单次请求内，不落库
#[derive(Debug, Clone)]
pub struct VoiceQuery {
    id: Uuid,
    audio_path: PathBuf,
    spoken_text: Option<String>,
    query: Option<KqlQuery>,
    /// 外层 Option 表示是否已执行，内层表示结果是否为空
    value: Option<Option<ScalarValue>>,
    summary: Option<String>,
    audio_filename: Option<String>,
    received_at: DateTime<Utc>,
}

impl VoiceQuery {
    /// 以上传的音频文件开始一次查询
    pub fn new(audio_path: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            audio_path: audio_path.into(),
            spoken_text: None,
            query: None,
            value: None,
            summary: None,
            audio_filename: None,
            received_at: Utc::now(),
        }
    }

    /// 当前已完成的最后一个阶段
    pub fn stage(&self) -> PipelineStage {
        if self.audio_filename.is_some() {
            PipelineStage::SpeechSynthesized
        } else if self.summary.is_some() {
            PipelineStage::Summarized
        } else if self.value.is_some() {
            PipelineStage::Executed
        } else if self.query.is_some() {
            PipelineStage::QuerySynthesized
        } else if self.spoken_text.is_some() {
            PipelineStage::Transcribed
        } else {
            PipelineStage::Received
        }
    }

    fn advance(&self, attempted: PipelineStage) -> Result<(), VoiceQueryError> {
        let current = self.stage();
        if current >= attempted {
            return Err(VoiceQueryError::AlreadyRecorded(attempted));
        }
        // 阶段枚举连续，前一阶段必须已完成
        let expected = match attempted {
            PipelineStage::Received => return Err(VoiceQueryError::AlreadyRecorded(attempted)),
            PipelineStage::Transcribed => PipelineStage::Received,
            PipelineStage::QuerySynthesized => PipelineStage::Transcribed,
            PipelineStage::Executed => PipelineStage::QuerySynthesized,
            PipelineStage::Summarized => PipelineStage::Executed,
            PipelineStage::SpeechSynthesized => PipelineStage::Summarized,
        };
        if current != expected {
            return Err(VoiceQueryError::OutOfOrder {
                attempted,
                missing: expected,
            });
        }
        Ok(())
    }

    pub fn record_transcript(&mut self, text: impl Into<String>) -> Result<(), VoiceQueryError> {
        self.advance(PipelineStage::Transcribed)?;
        self.spoken_text = Some(text.into());
        Ok(())
    }

    pub fn record_query(&mut self, query: KqlQuery) -> Result<(), VoiceQueryError> {
        self.advance(PipelineStage::QuerySynthesized)?;
        self.query = Some(query);
        Ok(())
    }

    pub fn record_result(&mut self, value: Option<ScalarValue>) -> Result<(), VoiceQueryError> {
        self.advance(PipelineStage::Executed)?;
        self.value = Some(value);
        Ok(())
    }

    pub fn record_summary(&mut self, summary: impl Into<String>) -> Result<(), VoiceQueryError> {
        self.advance(PipelineStage::Summarized)?;
        self.summary = Some(summary.into());
        Ok(())
    }

    pub fn record_audio(&mut self, filename: impl Into<String>) -> Result<(), VoiceQueryError> {
        self.advance(PipelineStage::SpeechSynthesized)?;
        self.audio_filename = Some(filename.into());
        Ok(())
    }

    // Getters
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    pub fn spoken_text(&self) -> Option<&str> {
        self.spoken_text.as_deref()
    }

    pub fn query(&self) -> Option<&KqlQuery> {
        self.query.as_ref()
    }

    /// 查询结果；未执行或结果为空时均为 `None`
    pub fn value(&self) -> Option<&ScalarValue> {
        self.value.as_ref().and_then(|v| v.as_ref())
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn audio_filename(&self) -> Option<&str> {
        self.audio_filename.as_deref()
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
