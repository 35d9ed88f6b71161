//! Application State
//!
//! HTTP 处理器共享的 Command/Query Handlers

use std::path::PathBuf;

use crate::application::{GetAudioHandler, VoiceQueryHandler};

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub voice_query_handler: VoiceQueryHandler,

    // ========== Query Handlers ==========
    pub get_audio_handler: GetAudioHandler,

    /// 上传音频的临时目录
    pub upload_dir: PathBuf,
    /// 挂载在 `/static` 的目录
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        voice_query_handler: VoiceQueryHandler,
        get_audio_handler: GetAudioHandler,
        upload_dir: impl Into<PathBuf>,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            voice_query_handler,
            get_audio_handler,
            upload_dir: upload_dir.into(),
            static_dir: static_dir.into(),
        }
    }
}
