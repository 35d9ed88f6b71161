//! 测试用端口实现

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    validate_audio_filename, AudioStorageError, AudioStoragePort, CompletionError,
    CompletionPort, CompletionRequest, RecognitionOutcome, ResultTable, SpeechRecognizerPort,
    StorageStats, SttError, TelemetryError, TelemetryStorePort,
};
use crate::domain::telemetry::KqlQuery;

/// 固定返回一个识别结果
pub struct FakeRecognizer {
    outcome: Result<RecognitionOutcome, String>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl FakeRecognizer {
    pub fn recognized(text: &str) -> Self {
        Self::with_outcome(RecognitionOutcome::Recognized(text.to_string()))
    }

    pub fn with_outcome(outcome: RecognitionOutcome) -> Self {
        Self {
            outcome: Ok(outcome),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// 识别前先等待，模拟慢速服务
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechRecognizerPort for FakeRecognizer {
    async fn recognize(&self, _audio_path: &Path) -> Result<RecognitionOutcome, SttError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome
            .clone()
            .map_err(SttError::NetworkError)
    }
}

/// 按顺序返回预设回复，并记录收到的请求
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(message.to_string())])),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionPort for ScriptedCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(CompletionError::ServiceError(message)),
            None => Err(CompletionError::InvalidResponse("no scripted reply".to_string())),
        }
    }
}

/// 固定返回一张结果表
pub struct FakeTelemetryStore {
    result: Result<ResultTable, String>,
    queries: Mutex<Vec<String>>,
}

impl FakeTelemetryStore {
    pub fn returning(table: ResultTable) -> Self {
        Self {
            result: Ok(table),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl TelemetryStorePort for FakeTelemetryStore {
    async fn query(&self, query: &KqlQuery) -> Result<ResultTable, TelemetryError> {
        self.queries.lock().unwrap().push(query.as_str().to_string());
        self.result.clone().map_err(TelemetryError::QueryError)
    }
}

/// 内存音频存储
#[derive(Default)]
pub struct MemoryAudioStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryAudioStorage {
    pub fn file_names(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl AudioStoragePort for MemoryAudioStorage {
    fn audio_path(&self, filename: &str) -> Result<PathBuf, AudioStorageError> {
        validate_audio_filename(filename)?;
        Ok(PathBuf::from("memory").join(filename))
    }

    async fn save_audio(&self, filename: &str, data: &[u8]) -> Result<PathBuf, AudioStorageError> {
        let path = self.audio_path(filename)?;
        let mut files = self.files.lock().unwrap();
        if files.contains_key(filename) {
            return Err(AudioStorageError::AlreadyExists(filename.to_string()));
        }
        files.insert(filename.to_string(), data.to_vec());
        Ok(path)
    }

    async fn read_audio(&self, filename: &str) -> Result<Vec<u8>, AudioStorageError> {
        validate_audio_filename(filename)?;
        self.files
            .lock()
            .unwrap()
            .get(filename)
            .cloned()
            .ok_or_else(|| AudioStorageError::FileNotFound(filename.to_string()))
    }

    async fn get_stats(&self) -> Result<StorageStats, AudioStorageError> {
        let files = self.files.lock().unwrap();
        Ok(StorageStats {
            used_bytes: files.values().map(|d| d.len() as u64).sum(),
            file_count: files.len() as u64,
        })
    }
}
