//! Query Synthesizer - 口语问题转 KQL

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CompletionPort, CompletionRequest};
use crate::domain::telemetry::{build_kql_prompt, sanitize_completion, KqlQuery};

/// 低温度，偏向确定性输出
pub const DEFAULT_QUERY_TEMPERATURE: f32 = 0.1;

pub struct QuerySynthesizer {
    completion: Arc<dyn CompletionPort>,
    temperature: f32,
}

impl QuerySynthesizer {
    pub fn new(completion: Arc<dyn CompletionPort>, temperature: f32) -> Self {
        Self {
            completion,
            temperature,
        }
    }

    /// 生成 KQL
    ///
    /// 补全接口的错误直接向上传播；输出命中黑名单时替换为固定安全查询
    pub async fn synthesize_query(&self, spoken_text: &str) -> Result<KqlQuery, ApplicationError> {
        let request = CompletionRequest::single_turn(build_kql_prompt(spoken_text), self.temperature);
        let completion = self.completion.complete(request).await?;
        let query = sanitize_completion(&completion);

        tracing::info!(kql = %query, "Query synthesized");
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::ScriptedCompletion;
    use crate::domain::telemetry::FALLBACK_QUERY;

    #[tokio::test]
    async fn test_trimmed_completion_is_returned() {
        let completion = Arc::new(ScriptedCompletion::new(&[
            "\n newtablwithmoredays | top 1 by Timestamp desc | project GenRPM = Gen_RPM \n",
        ]));
        let synthesizer = QuerySynthesizer::new(completion.clone(), DEFAULT_QUERY_TEMPERATURE);

        let query = synthesizer
            .synthesize_query("What is the current wind speed?")
            .await
            .unwrap();
        assert_eq!(
            query.as_str(),
            "newtablwithmoredays | top 1 by Timestamp desc | project GenRPM = Gen_RPM"
        );

        let requests = completion.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, DEFAULT_QUERY_TEMPERATURE);
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[0].messages[0].role, "user");
        assert!(requests[0].messages[0]
            .content
            .contains("User input: \"What is the current wind speed?\""));
    }

    #[tokio::test]
    async fn test_sql_completion_is_replaced() {
        let completion = Arc::new(ScriptedCompletion::new(&[
            "SELECT Gen_RPM FROM newtablwithmoredays ORDER BY Timestamp DESC LIMIT 1",
        ]));
        let synthesizer = QuerySynthesizer::new(completion, DEFAULT_QUERY_TEMPERATURE);

        let query = synthesizer.synthesize_query("current wind speed").await.unwrap();
        assert_eq!(query.as_str(), FALLBACK_QUERY);
    }

    #[tokio::test]
    async fn test_completion_failure_propagates() {
        let synthesizer = QuerySynthesizer::new(
            Arc::new(ScriptedCompletion::failing("HTTP 500")),
            DEFAULT_QUERY_TEMPERATURE,
        );
        let err = synthesizer.synthesize_query("anything").await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::ExternalServiceError { service: "completion", .. }
        ));
    }
}
