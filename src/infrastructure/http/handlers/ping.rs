//! Ping Handler

use axum::Json;
use serde::Serialize;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// 健康检查，不触达任何外部服务
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
