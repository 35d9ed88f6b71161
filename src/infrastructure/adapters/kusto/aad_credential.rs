//! AAD Client Credentials - Service Principal 令牌获取
//!
//! POST {authority}/{tenant}/oauth2/v2.0/token
//! Form: grant_type=client_credentials, client_id, client_secret, scope

use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::TelemetryError;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Service Principal 凭据配置
#[derive(Debug, Clone)]
pub struct ClientSecretCredentialConfig {
    /// 授权服务器，如 `https://login.microsoftonline.com`
    pub authority_host: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Service Principal 凭据
///
/// 每次调用都重新换取令牌
pub struct ClientSecretCredential {
    client: Client,
    config: ClientSecretCredentialConfig,
}

impl ClientSecretCredential {
    pub fn new(client: Client, config: ClientSecretCredentialConfig) -> Self {
        Self { client, config }
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.config.authority_host.trim_end_matches('/'),
            self.config.tenant_id
        )
    }

    /// 获取指定 scope 的访问令牌
    pub async fn get_token(&self, scope: &str) -> Result<String, TelemetryError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("scope", scope),
        ];

        let response = self
            .client
            .post(self.token_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TelemetryError::Timeout
                } else {
                    TelemetryError::NetworkError(format!("Token request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&text) {
                Ok(err) if !err.error.is_empty() => format!("{}: {}", err.error, err.error_description),
                _ => format!("HTTP {}: {}", status, text),
            };
            return Err(TelemetryError::AuthError(message));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TelemetryError::AuthError(format!("Invalid token response: {}", e)))?;

        tracing::debug!(
            tenant_id = %self.config.tenant_id,
            expires_in = ?token.expires_in,
            "Access token acquired"
        );
        Ok(token.access_token)
    }
}
