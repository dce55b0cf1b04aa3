//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod client_secret_credential_provider;
mod graph_directory_client;
mod http_status;
mod managed_identity_credential_provider;
mod oauth_token;
mod slack_webhook_sender;

pub use client_secret_credential_provider::{
    ClientSecretCredentialConfig, ClientSecretCredentialProvider, DEFAULT_AUTHORITY_HOST,
};
pub use graph_directory_client::{DEFAULT_GRAPH_BASE_URL, GraphDirectoryClient};
pub use managed_identity_credential_provider::{
    ManagedIdentityConfig, ManagedIdentityCredentialProvider,
};
pub use oauth_token::DEFAULT_GRAPH_SCOPE;
pub use slack_webhook_sender::SlackWebhookSender;
