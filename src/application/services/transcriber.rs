//! Transcriber - 语音转文字
//!
//! 只有识别成功且文本非空才返回文本，其它结果一律降级为 `None`。
//! 只含空白的识别文本同样视为未识别：空问题不应进入 KQL 生成

use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{RecognitionOutcome, SpeechRecognizerPort};

pub struct Transcriber {
    recognizer: Arc<dyn SpeechRecognizerPort>,
}

impl Transcriber {
    pub fn new(recognizer: Arc<dyn SpeechRecognizerPort>) -> Self {
        Self { recognizer }
    }

    /// 识别音频文件，失败不抛错
    pub async fn transcribe(&self, audio_path: &Path) -> Option<String> {
        match self.recognizer.recognize(audio_path).await {
            // 空白文本落入下一个分支
            Ok(RecognitionOutcome::Recognized(text)) if !text.trim().is_empty() => {
                tracing::info!(text = %text, "Speech recognized");
                Some(text)
            }
            Ok(outcome) => {
                tracing::warn!(outcome = ?outcome, path = %audio_path.display(), "Speech not recognized");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %audio_path.display(), "Speech recognition canceled");
                None
            }
        }
    }
}
