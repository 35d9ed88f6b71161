//! Windtalk - 风机遥测语音问答服务
//!
//! 启动流程：加载配置 -> 初始化日志 -> 创建适配器 -> 组装流水线 -> 启动 HTTP 服务

use std::path::PathBuf;
use std::sync::Arc;

use windtalk::application::{
    AudioStoragePort, GetAudioHandler, QueryExecutor, QuerySynthesizer, SpeechSynthesizer,
    Summarizer, Transcriber, VoiceQueryHandler,
};
use windtalk::config::{load_config_from_path, print_config, AppConfig, AudioRetention};
use windtalk::infrastructure::adapters::{
    AzureOpenAiClient, AzureOpenAiClientConfig, AzureSttClient, AzureSttClientConfig,
    AzureTtsClient, AzureTtsClientConfig, ClientSecretCredentialConfig, FileAudioStorage,
    KustoClient, KustoClientConfig,
};
use windtalk::infrastructure::http::{AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值），可选的第一个参数为配置文件路径
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config_from_path(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Windtalk - 风机遥测语音问答服务");
    print_config(&config);

    // 确保数据目录存在
    let audio_dir = config.storage.audio_dir();
    tokio::fs::create_dir_all(&audio_dir).await?;
    tokio::fs::create_dir_all(&config.storage.upload_dir).await?;

    // 音频存储
    let audio_storage = Arc::new(FileAudioStorage::new(&audio_dir).await?);
    let stats = audio_storage.get_stats().await?;
    match config.storage.retention {
        AudioRetention::External => tracing::info!(
            files = stats.file_count,
            bytes = stats.used_bytes,
            "Audio retention: external, synthesized files are never removed by this service"
        ),
    }

    // 语音识别
    let stt_config = AzureSttClientConfig::new(config.speech.stt_url(), &config.speech.key)
        .with_language(&config.speech.language)
        .with_timeout(config.speech.timeout_secs);
    let recognizer = Arc::new(AzureSttClient::new(stt_config)?);

    // 对话补全
    let completion = Arc::new(AzureOpenAiClient::new(AzureOpenAiClientConfig {
        endpoint: config.openai.endpoint.clone(),
        api_key: config.openai.api_key.clone(),
        api_version: config.openai.api_version.clone(),
        deployment: config.openai.deployment.clone(),
        timeout_secs: config.openai.timeout_secs,
    })?);

    // Kusto
    let telemetry_store = Arc::new(KustoClient::new(KustoClientConfig {
        cluster_url: config.kusto.cluster.clone(),
        database: config.kusto.database.clone(),
        credential: ClientSecretCredentialConfig {
            authority_host: config.aad.authority_host.clone(),
            tenant_id: config.aad.tenant_id.clone(),
            client_id: config.aad.client_id.clone(),
            client_secret: config.aad.client_secret.clone(),
        },
        timeout_secs: config.kusto.timeout_secs,
    })?);

    // 语音合成
    let tts_config = AzureTtsClientConfig::new(config.speech.tts_url(), &config.speech.key)
        .with_voice(&config.speech.language, &config.speech.voice)
        .with_timeout(config.speech.timeout_secs);
    let tts_engine = Arc::new(AzureTtsClient::new(tts_config)?);

    // 组装流水线
    let voice_query_handler = VoiceQueryHandler::new(
        Arc::new(Transcriber::new(recognizer)),
        Arc::new(QuerySynthesizer::new(
            completion.clone(),
            config.openai.query_temperature,
        )),
        Arc::new(QueryExecutor::new(telemetry_store)),
        Arc::new(Summarizer::new(completion, config.openai.summary_temperature)),
        Arc::new(SpeechSynthesizer::new(tts_engine, audio_storage.clone())),
    );

    // 创建 HTTP 服务器
    let state = AppState::new(
        voice_query_handler,
        GetAudioHandler::new(audio_storage),
        &config.storage.upload_dir,
        &config.storage.static_dir,
    );
    let server = HttpServer::new(config.server.addr(), state)
        .with_upload_limit(config.storage.max_upload_size);

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// 初始化日志，`RUST_LOG` 优先于配置文件中的级别
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},windtalk={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
