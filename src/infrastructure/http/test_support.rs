//! HTTP 测试夹具：临时目录 + 假端口组装的 AppState

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use super::routes::create_routes;
use super::state::AppState;
use crate::application::ports::{ResultColumn, ResultTable};
use crate::application::test_support::{FakeRecognizer, FakeTelemetryStore, ScriptedCompletion};
use crate::application::{
    GetAudioHandler, QueryExecutor, QuerySynthesizer, SpeechSynthesizer, Summarizer,
    Transcriber, VoiceQueryHandler,
};
use crate::infrastructure::adapters::{FakeTtsClient, FileAudioStorage};

const BOUNDARY: &str = "windtalk-test-boundary";

pub const GENERATED_KQL: &str =
    "newtablwithmoredays | top 1 by Timestamp desc | project GenRPM = Gen_RPM";
pub const SUMMARY: &str = "The current wind speed is 1500 RPM.";

pub struct TestApp {
    pub state: Arc<AppState>,
    pub recognizer: Arc<FakeRecognizer>,
    pub upload_dir: PathBuf,
    pub audio_dir: PathBuf,
    _root: TempDir,
}

impl TestApp {
    /// 只含路由，不含 server 层
    pub fn routes(&self) -> Router {
        create_routes(&self.state.static_dir).with_state(self.state.clone())
    }
}

pub async fn test_app(recognizer: FakeRecognizer, store: FakeTelemetryStore) -> TestApp {
    let root = TempDir::new().unwrap();
    let static_dir = root.path().join("static");
    let audio_dir = static_dir.join("audio");
    let upload_dir = root.path().join("uploads");
    std::fs::create_dir_all(&upload_dir).unwrap();

    let recognizer = Arc::new(recognizer);
    let storage = Arc::new(FileAudioStorage::new(&audio_dir).await.unwrap());
    let completion = Arc::new(ScriptedCompletion::new(&[GENERATED_KQL, SUMMARY]));

    let voice_query_handler = VoiceQueryHandler::new(
        Arc::new(Transcriber::new(recognizer.clone())),
        Arc::new(QuerySynthesizer::new(completion.clone(), 0.1)),
        Arc::new(QueryExecutor::new(Arc::new(store))),
        Arc::new(Summarizer::new(completion, 0.5)),
        Arc::new(SpeechSynthesizer::new(
            Arc::new(FakeTtsClient::default()),
            storage.clone(),
        )),
    );
    let state = AppState::new(
        voice_query_handler,
        GetAudioHandler::new(storage),
        &upload_dir,
        &static_dir,
    );

    TestApp {
        state: Arc::new(state),
        recognizer,
        upload_dir,
        audio_dir,
        _root: root,
    }
}

pub fn rpm_store() -> FakeTelemetryStore {
    FakeTelemetryStore::returning(ResultTable {
        columns: vec![ResultColumn {
            name: "GenRPM".to_string(),
            column_type: "long".to_string(),
        }],
        rows: vec![vec![json!(1500)]],
    })
}

pub fn multipart_request(field_name: &str) -> Request<Body> {
    multipart_request_with(field_name, b"RIFF\x00\x00\x00\x00WAVE")
}

pub fn multipart_request_with(field_name: &str, audio: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"question.wav\"\r\n",
            field_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
    body.extend_from_slice(audio);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/voice-query")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}
