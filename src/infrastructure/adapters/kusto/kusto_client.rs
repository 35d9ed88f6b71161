//! Kusto Client - Azure Data Explorer v1 REST 查询
//!
//! POST {cluster}/v1/rest/query
//! Request: {"db": "...", "csl": "..."}
//! Response: {"Tables": [{"TableName": "Table_0", "Columns": [...], "Rows": [[...]]}]}
//!
//! 第一张表即主结果集

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::aad_credential::{ClientSecretCredential, ClientSecretCredentialConfig};
use crate::application::ports::{ResultColumn, ResultTable, TelemetryError, TelemetryStorePort};
use crate::domain::telemetry::KqlQuery;

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    db: &'a str,
    csl: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct QueryResponse {
    #[serde(default)]
    tables: Vec<V1Table>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct V1Table {
    #[serde(default)]
    columns: Vec<V1Column>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct V1Column {
    column_name: String,
    #[serde(default)]
    column_type: Option<String>,
    #[serde(default)]
    data_type: Option<String>,
}

impl V1Column {
    /// 优先使用 ColumnType，缺失时由 .NET DataType 映射
    fn kusto_type(&self) -> String {
        if let Some(t) = &self.column_type {
            return t.clone();
        }
        match self.data_type.as_deref().unwrap_or_default() {
            "Boolean" | "SByte" => "bool",
            "Int32" => "int",
            "Int64" => "long",
            "Double" | "Single" => "real",
            "Decimal" | "SqlDecimal" => "decimal",
            "DateTime" => "datetime",
            "TimeSpan" => "timespan",
            "Guid" => "guid",
            _ => "string",
        }
        .to_string()
    }
}

/// Kusto 客户端配置
#[derive(Debug, Clone)]
pub struct KustoClientConfig {
    /// 集群 URL，如 `https://mycluster.westeurope.kusto.windows.net`
    pub cluster_url: String,
    pub database: String,
    pub credential: ClientSecretCredentialConfig,
    /// 请求超时时间（秒），0 表示使用 HTTP 客户端默认值
    pub timeout_secs: u64,
}

/// Kusto 客户端
pub struct KustoClient {
    client: Client,
    credential: ClientSecretCredential,
    config: KustoClientConfig,
}

impl KustoClient {
    pub fn new(config: KustoClientConfig) -> Result<Self, TelemetryError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| TelemetryError::NetworkError(e.to_string()))?;
        let credential = ClientSecretCredential::new(client.clone(), config.credential.clone());

        Ok(Self {
            client,
            credential,
            config,
        })
    }

    fn cluster(&self) -> &str {
        self.config.cluster_url.trim_end_matches('/')
    }

    fn query_url(&self) -> String {
        format!("{}/v1/rest/query", self.cluster())
    }

    /// 令牌 scope：`{cluster}/.default`
    fn scope(&self) -> String {
        format!("{}/.default", self.cluster())
    }
}

/// 从错误响应中取出可读信息
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            let err = v.get("error")?;
            err.get("@message")
                .or_else(|| err.get("message"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl TelemetryStorePort for KustoClient {
    async fn query(&self, query: &KqlQuery) -> Result<ResultTable, TelemetryError> {
        let token = self.credential.get_token(&self.scope()).await?;

        tracing::debug!(
            url = %self.query_url(),
            database = %self.config.database,
            "Executing KQL"
        );

        let response = self
            .client
            .post(self.query_url())
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&QueryBody {
                db: &self.config.database,
                csl: query.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TelemetryError::Timeout
                } else {
                    TelemetryError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status.as_u16() {
                401 | 403 => Err(TelemetryError::AuthError(format!("HTTP {}: {}", status, text))),
                _ => Err(TelemetryError::QueryError(extract_error_message(&text))),
            };
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| TelemetryError::InvalidResponse(e.to_string()))?;

        let primary = parsed
            .tables
            .into_iter()
            .next()
            .map(|t| ResultTable {
                columns: t
                    .columns
                    .iter()
                    .map(|c| ResultColumn {
                        name: c.column_name.clone(),
                        column_type: c.kusto_type(),
                    })
                    .collect(),
                rows: t.rows,
            })
            .unwrap_or_default();

        Ok(primary)
    }
}
