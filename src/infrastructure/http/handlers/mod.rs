//! HTTP Handlers

mod audio;
mod ping;
mod voice_query;

pub use audio::*;
pub use ping::*;
pub use voice_query::*;
