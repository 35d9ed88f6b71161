//! Kusto Adapter - Azure Data Explorer 查询实现
//!
//! - aad_credential: Service Principal 客户端凭据换取访问令牌
//! - kusto_client: v1 REST 查询

mod aad_credential;
mod kusto_client;

pub use aad_credential::{ClientSecretCredential, ClientSecretCredentialConfig};
pub use kusto_client::{KustoClient, KustoClientConfig};
