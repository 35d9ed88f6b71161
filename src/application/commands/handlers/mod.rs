//! Command Handlers 实现

mod voice_query_handlers;

pub use voice_query_handlers::*;
