use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use herald_core::AppError;
use herald_infrastructure::{
    ClientSecretCredentialConfig, DEFAULT_AUTHORITY_HOST, DEFAULT_GRAPH_BASE_URL,
    DEFAULT_GRAPH_SCOPE, ManagedIdentityConfig,
};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Directory credential selected from the environment.
#[derive(Debug, Clone)]
pub enum CredentialConfig {
    ClientSecret(ClientSecretCredentialConfig),
    ManagedIdentity(ManagedIdentityConfig),
}

impl CredentialConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClientSecret(_) => "client_secret",
            Self::ManagedIdentity(_) => "managed_identity",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HandlerConfig {
    pub handler_host: String,
    pub handler_port: u16,
    pub http_timeout_secs: u64,
    pub graph_base_url: Url,
    pub webhook_url: Option<Url>,
    pub credential: CredentialConfig,
}

impl HandlerConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let handler_host = var("HANDLER_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let handler_port = match var("FUNCTIONS_CUSTOMHANDLER_PORT") {
            Some(value) => value.parse::<u16>().map_err(|error| {
                AppError::Validation(format!(
                    "invalid FUNCTIONS_CUSTOMHANDLER_PORT value '{value}': {error}"
                ))
            })?,
            None => 3000,
        };
        let http_timeout_secs = match var("HTTP_TIMEOUT_SECS") {
            Some(value) => value.parse::<u64>().map_err(|error| {
                AppError::Validation(format!("invalid HTTP_TIMEOUT_SECS value '{value}': {error}"))
            })?,
            None => 15,
        };
        if http_timeout_secs == 0 {
            return Err(AppError::Validation(
                "HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        let graph_base_url = parse_url(
            "GRAPH_BASE_URL",
            var("GRAPH_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_owned())
                .as_str(),
        )?;
        let scope = var("GRAPH_SCOPE").unwrap_or_else(|| DEFAULT_GRAPH_SCOPE.to_owned());

        // Empty or absent means notifications are turned off.
        let webhook_url = var("SLACK_WEBHOOK_URL")
            .map(|value| parse_url("SLACK_WEBHOOK_URL", value.as_str()))
            .transpose()?;

        let credential = match (
            var("AZURE_TENANT_ID"),
            var("AZURE_CLIENT_ID"),
            var("AZURE_CLIENT_SECRET"),
        ) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => {
                CredentialConfig::ClientSecret(ClientSecretCredentialConfig {
                    authority_host: parse_url(
                        "AZURE_AUTHORITY_HOST",
                        var("AZURE_AUTHORITY_HOST")
                            .unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_owned())
                            .as_str(),
                    )?,
                    tenant_id,
                    client_id,
                    client_secret,
                    scope,
                })
            }
            (_, client_id, _) => match (var("IDENTITY_ENDPOINT"), var("IDENTITY_HEADER")) {
                (Some(endpoint), Some(identity_header)) => {
                    CredentialConfig::ManagedIdentity(ManagedIdentityConfig {
                        endpoint: parse_url("IDENTITY_ENDPOINT", endpoint.as_str())?,
                        identity_header,
                        client_id,
                        scope,
                    })
                }
                _ => {
                    return Err(AppError::Validation(
                        "no directory credential configured: set AZURE_TENANT_ID, \
                         AZURE_CLIENT_ID and AZURE_CLIENT_SECRET, or run with a managed \
                         identity (IDENTITY_ENDPOINT and IDENTITY_HEADER)"
                            .to_owned(),
                    ));
                }
            },
        };

        Ok(Self {
            handler_host,
            handler_port,
            http_timeout_secs,
            graph_base_url,
            webhook_url,
            credential,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.handler_host).map_err(|error| {
            AppError::Validation(format!(
                "invalid HANDLER_HOST '{}': {error}",
                self.handler_host
            ))
        })?;
        Ok(SocketAddr::from((host, self.handler_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_url(name: &str, value: &str) -> Result<Url, AppError> {
    Url::parse(value)
        .map_err(|error| AppError::Validation(format!("invalid {name} value '{value}': {error}")))
}
