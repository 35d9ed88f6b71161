//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Azure Speech（识别 + 合成）配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Azure OpenAI 配置
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Kusto 集群配置
    #[serde(default)]
    pub kusto: KustoConfig,

    /// Service Principal 凭据
    #[serde(default)]
    pub aad: AadConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Azure Speech 配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// 订阅 key
    #[serde(default)]
    pub key: String,

    /// 区域，如 `westeurope`
    #[serde(default)]
    pub region: String,

    /// 识别与合成语言
    #[serde(default = "default_language")]
    pub language: String,

    /// 合成语音名称
    #[serde(default = "default_voice")]
    pub voice: String,

    /// 覆盖识别 URL（默认由 region 推导）
    #[serde(default)]
    pub stt_endpoint: Option<String>,

    /// 覆盖合成 URL（默认由 region 推导）
    #[serde(default)]
    pub tts_endpoint: Option<String>,

    /// 请求超时时间（秒），0 表示不设置
    #[serde(default)]
    pub timeout_secs: u64,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_voice() -> String {
    "en-US-JennyNeural".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            region: String::new(),
            language: default_language(),
            voice: default_voice(),
            stt_endpoint: None,
            tts_endpoint: None,
            timeout_secs: 0,
        }
    }
}

impl SpeechConfig {
    /// 短音频识别 URL
    pub fn stt_url(&self) -> String {
        self.stt_endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1",
                self.region
            )
        })
    }

    /// 语音合成 URL
    pub fn tts_url(&self) -> String {
        self.tts_endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                self.region
            )
        })
    }
}

/// Azure OpenAI 配置
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// 资源 endpoint
    #[serde(default)]
    pub endpoint: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// 部署名称
    #[serde(default)]
    pub deployment: String,

    /// KQL 生成温度
    #[serde(default = "default_query_temperature")]
    pub query_temperature: f32,

    /// 摘要生成温度
    #[serde(default = "default_summary_temperature")]
    pub summary_temperature: f32,

    /// 请求超时时间（秒），0 表示不设置
    #[serde(default)]
    pub timeout_secs: u64,
}

fn default_api_version() -> String {
    "2024-02-01".to_string()
}

fn default_query_temperature() -> f32 {
    crate::application::services::DEFAULT_QUERY_TEMPERATURE
}

fn default_summary_temperature() -> f32 {
    crate::application::services::DEFAULT_SUMMARY_TEMPERATURE
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: default_api_version(),
            deployment: String::new(),
            query_temperature: default_query_temperature(),
            summary_temperature: default_summary_temperature(),
            timeout_secs: 0,
        }
    }
}

/// Kusto 集群配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KustoConfig {
    /// 集群 URL
    #[serde(default)]
    pub cluster: String,

    /// 数据库名
    #[serde(default)]
    pub database: String,

    /// 请求超时时间（秒），0 表示不设置
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Service Principal 凭据
#[derive(Debug, Clone, Deserialize)]
pub struct AadConfig {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    #[serde(default)]
    pub tenant_id: String,

    /// 授权服务器
    #[serde(default = "default_authority_host")]
    pub authority_host: String,
}

fn default_authority_host() -> String {
    "https://login.microsoftonline.com".to_string()
}

impl Default for AadConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            tenant_id: String::new(),
            authority_host: default_authority_host(),
        }
    }
}

/// 合成音频的保留策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioRetention {
    /// 本服务从不删除，由外部清理
    #[default]
    External,
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 静态文件根目录，挂载在 `/static`，合成音频位于其 `audio` 子目录
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// 上传音频的临时目录
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// 上传文件最大大小（字节）
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,

    /// 合成音频保留策略
    #[serde(default)]
    pub retention: AudioRetention,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("data/uploads")
}

fn default_max_upload_size() -> usize {
    25 * 1024 * 1024 // 25 MB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            upload_dir: default_upload_dir(),
            max_upload_size: default_max_upload_size(),
            retention: AudioRetention::default(),
        }
    }
}

impl StorageConfig {
    /// 合成音频目录
    pub fn audio_dir(&self) -> PathBuf {
        self.static_dir.join("audio")
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
