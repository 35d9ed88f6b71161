//! Summarizer - 把查询结果转成一句播报

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CompletionPort, CompletionRequest};
use crate::domain::telemetry::{build_summary_prompt, ScalarValue};

/// 较高温度，让措辞有变化
pub const DEFAULT_SUMMARY_TEMPERATURE: f32 = 0.5;

pub struct Summarizer {
    completion: Arc<dyn CompletionPort>,
    temperature: f32,
}

impl Summarizer {
    pub fn new(completion: Arc<dyn CompletionPort>, temperature: f32) -> Self {
        Self {
            completion,
            temperature,
        }
    }

    /// 生成回复文本（trim 后原样返回，不做内容校验）
    pub async fn summarize(
        &self,
        spoken_text: &str,
        value: Option<&ScalarValue>,
    ) -> Result<String, ApplicationError> {
        let prompt = build_summary_prompt(spoken_text, value);
        let request = CompletionRequest::single_turn(prompt, self.temperature);
        let summary = self.completion.complete(request).await?.trim().to_string();

        tracing::info!(summary = %summary, "Result summarized");
        Ok(summary)
    }
}
