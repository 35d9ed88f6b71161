//! HTTP Layer - RESTful API + 静态文件

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{build_router, HttpServer, DEFAULT_UPLOAD_LIMIT};
pub use state::AppState;
