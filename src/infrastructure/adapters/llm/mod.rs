//! LLM Adapter - Azure OpenAI 对话补全实现

mod azure_openai_client;

pub use azure_openai_client::*;
