use async_trait::async_trait;
use herald_application::{AccessToken, DirectoryClient};
use herald_core::{AppError, AppResult};
use herald_domain::{DirectoryProfile, DirectoryUserId, directory_profile_select};
use tracing::debug;
use url::Url;

use crate::http_status::{error_for_response, transport_error};

/// Default Microsoft Graph API root.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Microsoft Graph implementation of the directory lookup port.
#[derive(Clone)]
pub struct GraphDirectoryClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl GraphDirectoryClient {
    /// Creates a client rooted at `base_url` (for example
    /// `https://graph.microsoft.com/v1.0`).
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: Url) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    fn user_url(&self, user_id: &DirectoryUserId) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Validation(format!(
                    "graph base url '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("users")
            .push(user_id.as_str());
        url.query_pairs_mut()
            .append_pair("$select", directory_profile_select().as_str());

        Ok(url)
    }
}

#[async_trait]
impl DirectoryClient for GraphDirectoryClient {
    async fn fetch_user_profile(
        &self,
        access_token: &AccessToken,
        user_id: &DirectoryUserId,
    ) -> AppResult<DirectoryProfile> {
        let url = self.user_url(user_id)?;
        debug!(url = %url, "requesting directory user");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token.secret())
            .send()
            .await
            .map_err(|error| transport_error("graph user endpoint", &error))?;

        if !response.status().is_success() {
            return Err(error_for_response("graph user endpoint", response).await);
        }

        response.json::<DirectoryProfile>().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to parse graph user response for '{user_id}': {error}"
            ))
        })
    }
}
