//! Telemetry Store Port - 遥测库查询抽象

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::telemetry::{KqlQuery, ScalarValue};

/// 遥测库错误
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 结果列
#[derive(Debug, Clone, PartialEq)]
pub struct ResultColumn {
    pub name: String,
    /// Kusto 列类型，如 `long`、`real`、`datetime`
    pub column_type: String,
}

/// 主结果集
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<ResultColumn>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 第 0 行第 0 列；无行或单元格为 null 时返回 `None`
    pub fn first_cell(&self) -> Option<ScalarValue> {
        let cell = self.rows.first()?.first()?;
        let column_type = self
            .columns
            .first()
            .map(|c| c.column_type.as_str())
            .unwrap_or_default();
        ScalarValue::from_cell(column_type, cell)
    }
}

/// Telemetry Store Port
#[async_trait]
pub trait TelemetryStorePort: Send + Sync {
    /// 执行查询并返回主结果集
    async fn query(&self, query: &KqlQuery) -> Result<ResultTable, TelemetryError>;
}
