//! Voice Query Handler
//!
//! 接收上传音频，落盘到临时目录，执行流水线后删除临时文件。
//! 临时文件由 `UploadGuard` 持有，请求被取消（客户端断开、超时）时同样会删除

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use uuid::Uuid;

use crate::application::RunVoiceQuery;
use crate::infrastructure::http::dto::VoiceQueryResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 上传字段名
const FILE_FIELD: &str = "file";

/// 执行一次语音查询
pub async fn voice_query(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<VoiceQueryResponse>, ApiError> {
    let upload = save_upload(&state.upload_dir, multipart).await?;

    tracing::info!(path = %upload.path().display(), "Audio uploaded");

    let result = state
        .voice_query_handler
        .handle(RunVoiceQuery {
            audio_path: upload.path().to_path_buf(),
        })
        .await;

    drop(upload);

    Ok(Json(result?.into()))
}

/// 上传的临时文件，drop 时删除
struct UploadGuard(PathBuf);

impl UploadGuard {
    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.0) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.0.display(), error = %e, "Failed to remove upload");
            }
        }
    }
}

/// 读取 multipart 中的音频字段并写入 `upload_dir/{uuid}_{name}`
async fn save_upload(upload_dir: &Path, mut multipart: Multipart) -> Result<UploadGuard, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = sanitize_upload_name(field.file_name().unwrap_or_default());
        let data = field.bytes().await?;

        let upload = UploadGuard(upload_dir.join(format!("{}_{}", Uuid::new_v4().simple(), name)));
        fs::write(upload.path(), &data)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to save upload: {}", e)))?;

        return Ok(upload);
    }

    Err(ApiError::BadRequest("Audio file is required".to_string()))
}

/// 只保留文件名部分，并把不安全字符替换为 `_`
fn sanitize_upload_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload.wav".to_string()
    } else {
        cleaned
    }
}
