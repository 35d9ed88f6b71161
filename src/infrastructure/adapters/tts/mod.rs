//! TTS Adapter - Azure Speech 文本转语音实现

mod azure_tts_client;
mod fake_tts_client;

pub use azure_tts_client::*;
pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
