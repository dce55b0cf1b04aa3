use async_trait::async_trait;
use herald_application::{AccessToken, CredentialProvider};
use herald_core::AppResult;
use tracing::debug;
use url::Url;

use crate::http_status::transport_error;
use crate::oauth_token::{read_access_token, resource_for_scope};

const IDENTITY_API_VERSION: &str = "2019-08-01";

/// Hosted managed-identity endpoint settings, as injected by the platform.
#[derive(Debug, Clone)]
pub struct ManagedIdentityConfig {
    /// `IDENTITY_ENDPOINT` value.
    pub endpoint: Url,
    /// `IDENTITY_HEADER` value.
    pub identity_header: String,
    /// Client id of a user-assigned identity; `None` selects the
    /// system-assigned identity.
    pub client_id: Option<String>,
    /// Requested scope, e.g. `https://graph.microsoft.com/.default`.
    pub scope: String,
}

/// Managed-identity implementation of the credential port.
#[derive(Clone)]
pub struct ManagedIdentityCredentialProvider {
    http_client: reqwest::Client,
    config: ManagedIdentityConfig,
}

impl ManagedIdentityCredentialProvider {
    /// Creates a managed-identity credential provider.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: ManagedIdentityConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn token_url(&self) -> Url {
        let mut url = self.config.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("resource", resource_for_scope(self.config.scope.as_str()))
                .append_pair("api-version", IDENTITY_API_VERSION);
            if let Some(client_id) = self.config.client_id.as_deref() {
                query.append_pair("client_id", client_id);
            }
        }

        url
    }
}

#[async_trait]
impl CredentialProvider for ManagedIdentityCredentialProvider {
    async fn access_token(&self) -> AppResult<AccessToken> {
        debug!(
            user_assigned = self.config.client_id.is_some(),
            "requesting managed identity token"
        );

        let response = self
            .http_client
            .get(self.token_url())
            .header("X-IDENTITY-HEADER", self.config.identity_header.as_str())
            .send()
            .await
            .map_err(|error| transport_error("managed identity endpoint", &error))?;

        read_access_token("managed identity endpoint", response).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use herald_application::CredentialProvider;
    use herald_core::AppError;
    use url::Url;

    use super::{ManagedIdentityConfig, ManagedIdentityCredentialProvider};

    fn provider_for(
        server: &MockServer,
        client_id: Option<&str>,
    ) -> ManagedIdentityCredentialProvider {
        ManagedIdentityCredentialProvider::new(
            reqwest::Client::new(),
            ManagedIdentityConfig {
                endpoint: Url::parse(server.url("/msi/token").as_str())
                    .unwrap_or_else(|error| panic!("mock url should parse: {error}")),
                identity_header: "identity-secret".to_owned(),
                client_id: client_id.map(str::to_owned),
                scope: "https://graph.microsoft.com/.default".to_owned(),
            },
        )
    }

    #[tokio::test]
    async fn requests_token_for_graph_resource() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/msi/token")
                    .query_param("resource", "https://graph.microsoft.com")
                    .query_param("api-version", "2019-08-01")
                    .header("x-identity-header", "identity-secret");
                then.status(200).json_body(json!({
                    "access_token": "msi-token",
                    "expires_on": "1756724400",
                    "resource": "https://graph.microsoft.com",
                    "token_type": "Bearer"
                }));
            })
            .await;

        let token = provider_for(&server, None)
            .access_token()
            .await
            .unwrap_or_else(|error| panic!("token request should succeed: {error}"));

        mock.assert_async().await;
        assert_eq!(token.secret(), "msi-token");
    }

    #[tokio::test]
    async fn user_assigned_identity_sends_client_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/msi/token")
                    .query_param("client_id", "uami-1");
                then.status(200).json_body(json!({ "access_token": "uami-token" }));
            })
            .await;

        let token = provider_for(&server, Some("uami-1"))
            .access_token()
            .await
            .unwrap_or_else(|error| panic!("token request should succeed: {error}"));

        mock.assert_async().await;
        assert_eq!(token.secret(), "uami-token");
    }

    #[tokio::test]
    async fn empty_token_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/msi/token");
                then.status(200).json_body(json!({ "access_token": "" }));
            })
            .await;

        let result = provider_for(&server, None).access_token().await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
