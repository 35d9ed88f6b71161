//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping               GET   健康检查
//! - /api/voice-query        POST  上传音频并执行语音查询
//! - /api/audio/{filename}   GET   获取合成音频
//! - /static/*               GET   静态文件（合成音频位于 /static/audio）

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(static_dir: &Path) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .nest_service("/static", ServeDir::new(static_dir))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/voice-query", post(handlers::voice_query))
        .route("/audio/:filename", get(handlers::get_audio))
}
