use herald_application::AccessToken;
use herald_core::{AppError, AppResult};
use serde::Deserialize;

/// Default token scope for Microsoft Graph.
pub const DEFAULT_GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reads a bearer token out of a token endpoint response.
///
/// Any non-success status means the identity was rejected.
pub(crate) async fn read_access_token(
    target: &str,
    response: reqwest::Response,
) -> AppResult<AccessToken> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());
        return Err(AppError::Unauthorized(format!(
            "{target} returned status {}: {body}",
            status.as_u16()
        )));
    }

    let token = response.json::<TokenResponse>().await.map_err(|error| {
        AppError::Internal(format!("failed to parse {target} response body: {error}"))
    })?;

    if token.access_token.trim().is_empty() {
        return Err(AppError::Unauthorized(format!(
            "{target} returned an empty access token"
        )));
    }

    Ok(AccessToken::new(token.access_token))
}

/// Converts a `.default` scope into the resource URI expected by managed
/// identity endpoints.
#[must_use]
pub(crate) fn resource_for_scope(scope: &str) -> &str {
    scope.strip_suffix("/.default").unwrap_or(scope)
}
