//! STT Adapter - Azure Speech 语音识别实现

mod azure_stt_client;
mod wav_normalizer;

pub use azure_stt_client::*;
