//! HTTP Server
//!
//! 组装完整的 Router（路由 + 上传大小限制 + 日志 + CORS）并监听端口。
//! 浏览器前端与后端不同源，CORS 对所有来源、方法和请求头放行

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 上传大小的默认上限
pub const DEFAULT_UPLOAD_LIMIT: usize = 25 * 1024 * 1024;

/// HTTP 服务器
pub struct HttpServer {
    addr: String,
    upload_limit: usize,
    state: Arc<AppState>,
}

impl HttpServer {
    pub fn new(addr: impl Into<String>, state: AppState) -> Self {
        Self {
            addr: addr.into(),
            upload_limit: DEFAULT_UPLOAD_LIMIT,
            state: Arc::new(state),
        }
    }

    /// 设置请求体上限（字节），超出时上传返回 413
    pub fn with_upload_limit(mut self, upload_limit: usize) -> Self {
        self.upload_limit = upload_limit;
        self
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), self.upload_limit)
    }

    /// 监听并服务，直到 `shutdown_signal` 完成
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let listener = TcpListener::bind(&self.addr).await?;

        info!(
            addr = %listener.local_addr()?,
            upload_limit = self.upload_limit,
            "HTTP server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
    }
}

/// 完整的应用 Router
pub fn build_router(state: Arc<AppState>, upload_limit: usize) -> Router {
    let static_dir = state.static_dir.clone();

    create_routes(&static_dir)
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
