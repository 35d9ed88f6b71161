//! Audio Storage Port - 出站端口
//!
//! 定义合成音频文件的存储抽象。目录只追加，清理由外部负责

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 存储统计
#[derive(Debug, Clone, Default)]
pub struct StorageStats {
    /// 已使用空间（字节）
    pub used_bytes: u64,
    /// 文件数量
    pub file_count: u64,
}

/// Audio Storage Port - 出站端口
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 获取音频文件路径（不检查存在性）
    fn audio_path(&self, filename: &str) -> Result<PathBuf, AudioStorageError>;

    /// 保存新音频；同名文件已存在时报错，不覆盖
    async fn save_audio(&self, filename: &str, data: &[u8]) -> Result<PathBuf, AudioStorageError>;

    /// 读取音频数据
    async fn read_audio(&self, filename: &str) -> Result<Vec<u8>, AudioStorageError>;

    /// 获取存储统计
    async fn get_stats(&self) -> Result<StorageStats, AudioStorageError>;
}

/// 校验文件名只包含单级路径
pub fn validate_audio_filename(filename: &str) -> Result<(), AudioStorageError> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains('\0');
    if invalid {
        return Err(AudioStorageError::InvalidName(filename.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename() {
        assert!(validate_audio_filename("0f3a.wav").is_ok());
        assert!(validate_audio_filename("").is_err());
        assert!(validate_audio_filename("..").is_err());
        assert!(validate_audio_filename("../etc/passwd").is_err());
        assert!(validate_audio_filename("a..b.wav").is_ok());
        assert!(validate_audio_filename("a/b.wav").is_err());
        assert!(validate_audio_filename("a\\b.wav").is_err());
    }
}
