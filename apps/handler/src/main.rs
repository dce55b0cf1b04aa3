//! Herald directory user notifier: function host custom handler.

#![forbid(unsafe_code)]

mod dto;
mod error;
mod handler_config;
mod handlers;
mod router;
mod state;

use std::sync::Arc;
use std::time::Duration;

use herald_application::{
    CredentialProvider, DirectoryClient, NotificationSender, UserLifecycleService,
};
use herald_core::AppError;
use herald_infrastructure::{
    ClientSecretCredentialProvider, GraphDirectoryClient, ManagedIdentityCredentialProvider,
    SlackWebhookSender,
};
use tracing::info;

use crate::handler_config::{CredentialConfig, HandlerConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = HandlerConfig::load()?;
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let lifecycle_service = build_lifecycle_service(&config, http_client);
    let app = router::build_router(AppState { lifecycle_service });

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        credential = config.credential.kind(),
        graph_base_url = %config.graph_base_url,
        notifications_enabled = config.webhook_url.is_some(),
        "herald-handler listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("handler server error: {error}")))
}

fn build_lifecycle_service(
    config: &HandlerConfig,
    http_client: reqwest::Client,
) -> UserLifecycleService {
    let credential_provider: Arc<dyn CredentialProvider> = match &config.credential {
        CredentialConfig::ClientSecret(secret) => Arc::new(ClientSecretCredentialProvider::new(
            http_client.clone(),
            secret.clone(),
        )),
        CredentialConfig::ManagedIdentity(identity) => Arc::new(
            ManagedIdentityCredentialProvider::new(http_client.clone(), identity.clone()),
        ),
    };
    let directory_client: Arc<dyn DirectoryClient> = Arc::new(GraphDirectoryClient::new(
        http_client.clone(),
        config.graph_base_url.clone(),
    ));
    let notification_sender = config.webhook_url.clone().map(|webhook_url| {
        Arc::new(SlackWebhookSender::new(http_client, webhook_url)) as Arc<dyn NotificationSender>
    });

    UserLifecycleService::new(credential_provider, directory_client, notification_sender)
}
