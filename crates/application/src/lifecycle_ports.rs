use std::fmt::{Debug, Formatter};

use async_trait::async_trait;
use herald_core::AppResult;
use herald_domain::{ChatMessage, DirectoryProfile, DirectoryUserId};

/// Bearer token for the directory API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw bearer token.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token for an `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for AccessToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AccessToken(<redacted>)")
    }
}

/// Port for acquiring directory API credentials.
///
/// Implementations own any caching or refresh behaviour.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns a bearer token scoped to the directory API.
    async fn access_token(&self) -> AppResult<AccessToken>;
}

/// Read-only port for directory user lookups.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetches the profile projection for one user.
    async fn fetch_user_profile(
        &self,
        access_token: &AccessToken,
        user_id: &DirectoryUserId,
    ) -> AppResult<DirectoryProfile>;
}

/// Port for delivering chat notifications.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Posts one message.
    async fn send_message(&self, message: &ChatMessage) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::AccessToken;

    #[test]
    fn access_token_debug_output_is_redacted() {
        let token = AccessToken::new("eyJ0eXAiOiJKV1Qi");
        assert_eq!(format!("{token:?}"), "AccessToken(<redacted>)");
        assert_eq!(token.secret(), "eyJ0eXAiOiJKV1Qi");
    }
}
