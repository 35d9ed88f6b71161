//! Voice Query Command Handler
//!
//! 流水线: 识别 -> 生成 KQL -> 执行 -> 摘要 -> 合成语音
//! 每一步等待上一步完成；识别失败提前返回，其它错误直接向上传播

use chrono::Utc;
use std::sync::Arc;
use tracing::Instrument;

use crate::application::commands::{RunVoiceQuery, VoiceQueryResult};
use crate::application::error::ApplicationError;
use crate::application::services::{
    QueryExecutor, QuerySynthesizer, SpeechSynthesizer, Summarizer, Transcriber,
};
use crate::domain::voice_query::VoiceQuery;

/// RunVoiceQuery Handler
pub struct VoiceQueryHandler {
    transcriber: Arc<Transcriber>,
    query_synthesizer: Arc<QuerySynthesizer>,
    query_executor: Arc<QueryExecutor>,
    summarizer: Arc<Summarizer>,
    speech_synthesizer: Arc<SpeechSynthesizer>,
}

impl VoiceQueryHandler {
    pub fn new(
        transcriber: Arc<Transcriber>,
        query_synthesizer: Arc<QuerySynthesizer>,
        query_executor: Arc<QueryExecutor>,
        summarizer: Arc<Summarizer>,
        speech_synthesizer: Arc<SpeechSynthesizer>,
    ) -> Self {
        Self {
            transcriber,
            query_synthesizer,
            query_executor,
            summarizer,
            speech_synthesizer,
        }
    }

    pub async fn handle(&self, command: RunVoiceQuery) -> Result<VoiceQueryResult, ApplicationError> {
        let vq = VoiceQuery::new(command.audio_path);
        let span = tracing::info_span!("voice_query", id = %vq.id());
        self.run(vq).instrument(span).await
    }

    async fn run(&self, mut vq: VoiceQuery) -> Result<VoiceQueryResult, ApplicationError> {
        let Some(spoken_text) = self.transcriber.transcribe(vq.audio_path()).await else {
            tracing::info!("Pipeline stopped: speech not recognized");
            return Ok(VoiceQueryResult::not_recognized());
        };
        vq.record_transcript(spoken_text.clone())?;

        let query = self.query_synthesizer.synthesize_query(&spoken_text).await?;
        vq.record_query(query.clone())?;

        let value = self.query_executor.execute(&query).await?;
        vq.record_result(value)?;

        let summary = self.summarizer.summarize(&spoken_text, vq.value()).await?;
        vq.record_summary(summary.clone())?;

        let filename = self.speech_synthesizer.synthesize(&summary).await?;
        vq.record_audio(filename)?;

        tracing::info!(
            stage = ?vq.stage(),
            elapsed_ms = (Utc::now() - vq.received_at()).num_milliseconds(),
            "Voice query completed"
        );

        Ok(VoiceQueryResult::from_completed(&vq))
    }
}
