use async_trait::async_trait;
use herald_application::{AccessToken, CredentialProvider};
use herald_core::{AppError, AppResult};
use tracing::debug;
use url::Url;
use url::form_urlencoded;

use crate::http_status::transport_error;
use crate::oauth_token::read_access_token;

/// Default Entra ID authority host.
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Application registration used for the client-credentials grant.
#[derive(Debug, Clone)]
pub struct ClientSecretCredentialConfig {
    /// Authority host, usually `https://login.microsoftonline.com`.
    pub authority_host: Url,
    /// Directory (tenant) identifier.
    pub tenant_id: String,
    /// Application (client) identifier.
    pub client_id: String,
    /// Client secret value.
    pub client_secret: String,
    /// Requested scope, e.g. `https://graph.microsoft.com/.default`.
    pub scope: String,
}

/// OAuth2 client-credentials implementation of the credential port.
///
/// Requests a fresh token on every call.
#[derive(Clone)]
pub struct ClientSecretCredentialProvider {
    http_client: reqwest::Client,
    config: ClientSecretCredentialConfig,
}

impl ClientSecretCredentialProvider {
    /// Creates a credential provider for one app registration.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: ClientSecretCredentialConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn token_url(&self) -> AppResult<Url> {
        let mut url = self.config.authority_host.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Validation(format!(
                    "authority host '{}' cannot carry a path",
                    self.config.authority_host
                ))
            })?
            .pop_if_empty()
            .extend([self.config.tenant_id.as_str(), "oauth2", "v2.0", "token"]);

        Ok(url)
    }

    fn token_request_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "client_credentials")
            .append_pair("client_id", self.config.client_id.as_str())
            .append_pair("client_secret", self.config.client_secret.as_str())
            .append_pair("scope", self.config.scope.as_str())
            .finish()
    }
}

#[async_trait]
impl CredentialProvider for ClientSecretCredentialProvider {
    async fn access_token(&self) -> AppResult<AccessToken> {
        let url = self.token_url()?;
        debug!(
            tenant_id = %self.config.tenant_id,
            client_id = %self.config.client_id,
            "requesting client credentials token"
        );

        let response = self
            .http_client
            .post(url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(self.token_request_body())
            .send()
            .await
            .map_err(|error| transport_error("token endpoint", &error))?;

        read_access_token("token endpoint", response).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use herald_application::CredentialProvider;
    use herald_core::AppError;
    use url::Url;

    use super::{ClientSecretCredentialConfig, ClientSecretCredentialProvider};

    fn provider_for(server: &MockServer) -> ClientSecretCredentialProvider {
        ClientSecretCredentialProvider::new(
            reqwest::Client::new(),
            ClientSecretCredentialConfig {
                authority_host: Url::parse(server.base_url().as_str())
                    .unwrap_or_else(|error| panic!("mock url should parse: {error}")),
                tenant_id: "tenant-1".to_owned(),
                client_id: "client-1".to_owned(),
                client_secret: "s3cr3t".to_owned(),
                scope: "https://graph.microsoft.com/.default".to_owned(),
            },
        )
    }

    #[tokio::test]
    async fn exchanges_client_secret_for_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/tenant-1/oauth2/v2.0/token")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body_includes("grant_type=client_credentials")
                    .body_includes("client_id=client-1")
                    .body_includes("scope=https%3A%2F%2Fgraph.microsoft.com%2F.default");
                then.status(200).json_body(json!({
                    "token_type": "Bearer",
                    "expires_in": 3599,
                    "access_token": "graph-token"
                }));
            })
            .await;

        let token = provider_for(&server)
            .access_token()
            .await
            .unwrap_or_else(|error| panic!("token request should succeed: {error}"));

        mock.assert_async().await;
        assert_eq!(token.secret(), "graph-token");
    }

    #[tokio::test]
    async fn rejected_client_maps_to_unauthorized() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/tenant-1/oauth2/v2.0/token");
                then.status(400).json_body(json!({ "error": "invalid_client" }));
            })
            .await;

        let result = provider_for(&server).access_token().await;

        assert!(matches!(
            result,
            Err(AppError::Unauthorized(message)) if message.contains("invalid_client")
        ));
    }
}
