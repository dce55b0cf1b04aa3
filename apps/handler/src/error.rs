use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use herald_core::AppError;

use crate::dto::InvocationResponse;

/// Handler error wrapper around core application errors.
///
/// Request decoding problems answer 400; any pipeline failure answers 500 so
/// the host applies its own retry policy.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: AppError,
}

impl ApiError {
    pub fn bad_request(error: AppError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    pub fn invocation_failed(error: AppError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self::invocation_failed(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::bad_request(AppError::Validation(format!(
            "invalid request body: {}",
            value.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = Json(InvocationResponse::failed(self.error.to_string()));

        (self.status, payload).into_response()
    }
}

/// Standard handler result type.
pub type ApiResult<T> = Result<T, ApiError>;
