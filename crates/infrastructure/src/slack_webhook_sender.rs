use async_trait::async_trait;
use herald_application::NotificationSender;
use herald_core::AppResult;
use herald_domain::ChatMessage;
use url::Url;

use crate::http_status::{error_for_response, transport_error};

/// Incoming-webhook implementation of the notification port.
///
/// Posts `{"text": ...}` once per message. Delivery failures are returned to
/// the caller without retrying.
#[derive(Clone)]
pub struct SlackWebhookSender {
    http_client: reqwest::Client,
    webhook_url: Url,
}

impl SlackWebhookSender {
    /// Creates a sender for one webhook URL.
    #[must_use]
    pub fn new(http_client: reqwest::Client, webhook_url: Url) -> Self {
        Self {
            http_client,
            webhook_url,
        }
    }
}

#[async_trait]
impl NotificationSender for SlackWebhookSender {
    async fn send_message(&self, message: &ChatMessage) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.webhook_url.clone())
            .json(message)
            .send()
            .await
            .map_err(|error| transport_error("notification webhook", &error))?;

        if !response.status().is_success() {
            return Err(error_for_response("notification webhook", response).await);
        }

        Ok(())
    }
}
