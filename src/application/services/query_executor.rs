//! Query Executor - 执行 KQL 并取第一个单元格

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::TelemetryStorePort;
use crate::domain::telemetry::{KqlQuery, ScalarValue};

pub struct QueryExecutor {
    store: Arc<dyn TelemetryStorePort>,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn TelemetryStorePort>) -> Self {
        Self { store }
    }

    /// 返回主结果集第 0 行第 0 列；空结果返回 `None`
    pub async fn execute(&self, query: &KqlQuery) -> Result<Option<ScalarValue>, ApplicationError> {
        let table = self.store.query(query).await?;
        let value = table.first_cell();

        tracing::info!(
            rows = table.rows.len(),
            value = ?value,
            "Query executed"
        );
        Ok(value)
    }
}
