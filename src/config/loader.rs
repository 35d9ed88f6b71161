//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `WINDTALK_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `WINDTALK_SERVER__PORT=8080`
/// - `WINDTALK_SPEECH__KEY=...`
/// - `WINDTALK_SPEECH__REGION=westeurope`
/// - `WINDTALK_OPENAI__ENDPOINT=https://my-resource.openai.azure.com`
/// - `WINDTALK_KUSTO__CLUSTER=https://mycluster.westeurope.kusto.windows.net`
/// - `WINDTALK_AAD__CLIENT_SECRET=...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("speech.language", "en-US")?
        .set_default("speech.voice", "en-US-JennyNeural")?
        .set_default("speech.timeout_secs", 0)?
        .set_default("openai.api_version", "2024-02-01")?
        .set_default("openai.query_temperature", 0.1)?
        .set_default("openai.summary_temperature", 0.5)?
        .set_default("openai.timeout_secs", 0)?
        .set_default("kusto.timeout_secs", 0)?
        .set_default("aad.authority_host", "https://login.microsoftonline.com")?
        .set_default("storage.static_dir", "static")?
        .set_default("storage.upload_dir", "data/uploads")?
        .set_default("storage.max_upload_size", 25 * 1024 * 1024)?
        .set_default("storage.retention", "external")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: WINDTALK_OPENAI__API_KEY=xxx -> openai.api_key
    builder = builder.add_source(
        Environment::with_prefix("WINDTALK")
            .prefix_separator("_")
            .separator("__"),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn require(value: &str, name: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be empty",
            name
        )));
    }
    Ok(())
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    require(&config.speech.key, "speech.key")?;
    // 两个 URL 都显式指定时可以不填 region
    if config.speech.stt_endpoint.is_none() || config.speech.tts_endpoint.is_none() {
        require(&config.speech.region, "speech.region")?;
    }

    require(&config.openai.endpoint, "openai.endpoint")?;
    require(&config.openai.api_key, "openai.api_key")?;
    require(&config.openai.api_version, "openai.api_version")?;
    require(&config.openai.deployment, "openai.deployment")?;

    for (name, t) in [
        ("openai.query_temperature", config.openai.query_temperature),
        ("openai.summary_temperature", config.openai.summary_temperature),
    ] {
        if !(0.0..=2.0).contains(&t) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be within [0, 2], got {}",
                name, t
            )));
        }
    }

    require(&config.kusto.cluster, "kusto.cluster")?;
    require(&config.kusto.database, "kusto.database")?;

    require(&config.aad.client_id, "aad.client_id")?;
    require(&config.aad.client_secret, "aad.client_secret")?;
    require(&config.aad.tenant_id, "aad.tenant_id")?;

    Ok(())
}

/// 隐藏密钥，只保留末 4 位
fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Speech Region: {} ({})", config.speech.region, config.speech.language);
    tracing::info!("Speech Key: {}", mask(&config.speech.key));
    tracing::info!("STT URL: {}", config.speech.stt_url());
    tracing::info!("TTS URL: {} (voice {})", config.speech.tts_url(), config.speech.voice);
    tracing::info!("OpenAI Endpoint: {}", config.openai.endpoint);
    tracing::info!("OpenAI Deployment: {} (api-version {})", config.openai.deployment, config.openai.api_version);
    tracing::info!("OpenAI Key: {}", mask(&config.openai.api_key));
    tracing::info!(
        "Temperatures: query={}, summary={}",
        config.openai.query_temperature,
        config.openai.summary_temperature
    );
    tracing::info!("Kusto: {} / {}", config.kusto.cluster, config.kusto.database);
    tracing::info!("AAD Tenant: {}, Client: {}", config.aad.tenant_id, config.aad.client_id);
    tracing::info!("AAD Secret: {}", mask(&config.aad.client_secret));
    tracing::info!("Audio Directory: {:?}", config.storage.audio_dir());
    tracing::info!("Upload Directory: {:?}", config.storage.upload_dir);
    tracing::info!("Audio Retention: {:?}", config.storage.retention);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
