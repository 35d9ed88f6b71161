//! Azure OpenAI Client - 调用 Azure OpenAI chat completions
//!
//! POST {endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}
//! Header: api-key
//! Request: {"messages": [...], "temperature": 0.1}
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ChatMessage, CompletionError, CompletionPort, CompletionRequest};

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    messages: &'a [ChatMessage],
    temperature: f32,
    /// 单候选
    n: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Azure OpenAI 客户端配置
#[derive(Debug, Clone)]
pub struct AzureOpenAiClientConfig {
    /// 资源 endpoint，如 `https://my-resource.openai.azure.com`
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    /// 部署名称
    pub deployment: String,
    /// 请求超时时间（秒），0 表示使用 HTTP 客户端默认值
    pub timeout_secs: u64,
}

/// Azure OpenAI 客户端
pub struct AzureOpenAiClient {
    client: Client,
    config: AzureOpenAiClientConfig,
}

impl AzureOpenAiClient {
    pub fn new(config: AzureOpenAiClientConfig) -> Result<Self, CompletionError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| CompletionError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取补全 URL（不含 api-version）
    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment
        )
    }
}

#[async_trait]
impl CompletionPort for AzureOpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatCompletionBody {
            messages: &request.messages,
            temperature: request.temperature,
            n: 1,
        };

        tracing::debug!(
            url = %self.completions_url(),
            temperature = request.temperature,
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompletionError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("No completion choice returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config(endpoint: String) -> AzureOpenAiClientConfig {
        AzureOpenAiClientConfig {
            endpoint,
            api_key: "test-key".to_string(),
            api_version: "2024-02-01".to_string(),
            deployment: "gpt-4o".to_string(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let router = Router::new().route(
            "/openai/deployments/:deployment/chat/completions",
            post(
                |Path(deployment): Path<String>,
                 Query(params): Query<HashMap<String, String>>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    assert_eq!(deployment, "gpt-4o");
                    assert_eq!(params["api-version"], "2024-02-01");
                    assert_eq!(headers["api-key"], "test-key");
                    assert_eq!(body["messages"][0]["role"], "user");
                    assert_eq!(body["messages"][0]["content"], "hello");
                    assert_eq!(body["n"], 1);
                    Json(json!({
                        "choices": [
                            { "index": 0, "message": { "role": "assistant", "content": "  print 1 \n" } }
                        ]
                    }))
                },
            ),
        );
        let base = spawn_server(router).await;
        let client = AzureOpenAiClient::new(config(format!("{}/", base))).unwrap();

        let text = client
            .complete(CompletionRequest::single_turn("hello", 0.1))
            .await
            .unwrap();
        // 原样返回，trim 由调用方负责
        assert_eq!(text, "  print 1 \n");
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid() {
        let router = Router::new().route(
            "/openai/deployments/:deployment/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let base = spawn_server(router).await;
        let client = AzureOpenAiClient::new(config(base)).unwrap();

        let err = client
            .complete(CompletionRequest::single_turn("hello", 0.1))
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_http_error_is_service_error() {
        let router = Router::new().route(
            "/openai/deployments/:deployment/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
        );
        let base = spawn_server(router).await;
        let client = AzureOpenAiClient::new(config(base)).unwrap();

        let err = client
            .complete(CompletionRequest::single_turn("hello", 0.5))
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::ServiceError(msg) if msg.contains("429")));
    }
}
