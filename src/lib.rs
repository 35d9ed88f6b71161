//! Windtalk - 风机遥测语音问答服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Telemetry Context: 表结构、提示词、KQL 黑名单
//! - Voice Query Context: 流水线阶段与状态
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechRecognizer, Completion, TelemetryStore, TtsEngine, AudioStorage）
//! - Services: 流水线各阶段
//! - Commands: 语音查询命令处理器
//! - Queries: 音频读取查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 静态文件
//! - Adapters: Azure Speech、Azure OpenAI、Kusto、文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
