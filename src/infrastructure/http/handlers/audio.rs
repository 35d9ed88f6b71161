//! Audio Handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::GetAudioQuery;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 按文件名读取合成音频
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let result = state
        .get_audio_handler
        .handle(GetAudioQuery { filename })
        .await?;

    Ok((
        [(header::CONTENT_TYPE, result.content_type)],
        result.audio_data,
    )
        .into_response())
}
