use herald_core::AppError;
use reqwest::StatusCode;

/// Converts a non-success response into an application error, keeping the
/// status and body text for diagnostics.
pub(crate) async fn error_for_response(target: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<response body unavailable>".to_owned());
    let message = format!("{target} returned status {}: {body}", status.as_u16());

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        _ => AppError::Internal(message),
    }
}

/// Wraps a transport failure for `target`.
pub(crate) fn transport_error(target: &str, error: &reqwest::Error) -> AppError {
    AppError::Internal(format!("failed to call {target}: {error}"))
}
