//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait。目录只追加：新文件以 create_new 打开，从不覆盖或删除

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::application::ports::{
    validate_audio_filename, AudioStorageError, AudioStoragePort, StorageStats,
};

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileAudioStorage {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, AudioStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }
}

/// 写入并刷新；失败时删除已创建的文件，不留下半截音频
async fn write_or_remove<W>(path: &Path, writer: &mut W, data: &[u8]) -> Result<(), AudioStorageError>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(data).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        if let Err(remove_err) = fs::remove_file(path).await {
            tracing::warn!("Failed to remove partial audio {:?}: {}", path, remove_err);
        }
        return Err(AudioStorageError::IoError(e.to_string()));
    }
    Ok(())
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    fn audio_path(&self, filename: &str) -> Result<PathBuf, AudioStorageError> {
        validate_audio_filename(filename)?;
        Ok(self.base_dir.join(filename))
    }

    async fn save_audio(&self, filename: &str, data: &[u8]) -> Result<PathBuf, AudioStorageError> {
        let audio_path = self.audio_path(filename)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&audio_path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    AudioStorageError::AlreadyExists(filename.to_string())
                }
                _ => AudioStorageError::IoError(e.to_string()),
            })?;

        write_or_remove(&audio_path, &mut file, data).await?;

        tracing::debug!(
            "Saved audio: file={}, size={} bytes",
            filename,
            data.len()
        );

        Ok(audio_path)
    }

    async fn read_audio(&self, filename: &str) -> Result<Vec<u8>, AudioStorageError> {
        let audio_path = self.audio_path(filename)?;

        match fs::read(&audio_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AudioStorageError::FileNotFound(filename.to_string()))
            }
            Err(e) => Err(AudioStorageError::IoError(e.to_string())),
        }
    }

    async fn get_stats(&self) -> Result<StorageStats, AudioStorageError> {
        let mut stats = StorageStats::default();

        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?
        {
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| AudioStorageError::IoError(e.to_string()))?;
            if metadata.is_file() {
                stats.used_bytes += metadata.len();
                stats.file_count += 1;
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tempfile::tempdir;

    /// 写入总是失败的 writer，模拟磁盘写满
    struct DiskFullWriter;

    impl AsyncWrite for DiskFullWriter {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, "no space left")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_save_and_read_audio() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();

        let data = b"fake wav data";

        // Save
        let path = storage.save_audio("abc.wav", data).await.unwrap();
        assert!(path.exists());
        assert_eq!(path, temp_dir.path().join("abc.wav"));

        // Read
        let read_data = storage.read_audio("abc.wav").await.unwrap();
        assert_eq!(read_data, data);
    }

    #[tokio::test]
    async fn test_existing_file_is_not_overwritten() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();

        storage.save_audio("dup.wav", b"first").await.unwrap();
        let err = storage.save_audio("dup.wav", b"second").await.unwrap_err();

        assert!(matches!(err, AudioStorageError::AlreadyExists(_)));
        assert_eq!(storage.read_audio("dup.wav").await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_missing_and_invalid_names() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path().join("audio")).await.unwrap();

        assert!(matches!(
            storage.read_audio("missing.wav").await,
            Err(AudioStorageError::FileNotFound(_))
        ));
        assert!(matches!(
            storage.read_audio("../secret.wav").await,
            Err(AudioStorageError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_write_removes_partial_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("partial.wav");
        fs::write(&path, b"RIFF").await.unwrap();

        let err = write_or_remove(&path, &mut DiskFullWriter, b"more data")
            .await
            .unwrap_err();

        assert!(matches!(err, AudioStorageError::IoError(_)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_dotted_name_is_stored() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();

        storage.save_audio("a..b.wav", b"data").await.unwrap();
        assert_eq!(storage.read_audio("a..b.wav").await.unwrap(), b"data");
    }

    #[tokio::test]
    async fn test_stats() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();

        for i in 0..3 {
            storage
                .save_audio(&format!("{}.wav", i), b"data")
                .await
                .unwrap();
        }

        let stats = storage.get_stats().await.unwrap();
        assert_eq!(stats.file_count, 3);
        assert_eq!(stats.used_bytes, 12);
    }
}
