use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use herald_core::AppError;
use herald_domain::DirectoryUserEvent;
use tracing::{Instrument, info_span, warn};

use crate::dto::{InvocationRequest, InvocationResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Function host trigger entry point.
pub async fn invocation_handler(
    State(state): State<AppState>,
    payload: Result<Json<InvocationRequest>, JsonRejection>,
) -> ApiResult<Json<InvocationResponse>> {
    let Json(request) = payload.inspect_err(log_rejected_body)?;
    let invocation_id = request
        .invocation_id()
        .map(str::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let event = request.event().map_err(|error| {
        warn!(invocation_id = %invocation_id, error = %error, "rejected invocation payload");
        ApiError::bad_request(error)
    })?;

    run_pipeline(&state, &event, invocation_id.as_str()).await
}

/// Direct delivery of a bare event envelope.
pub async fn event_handler(
    State(state): State<AppState>,
    payload: Result<Json<DirectoryUserEvent>, JsonRejection>,
) -> ApiResult<Json<InvocationResponse>> {
    let Json(event) = payload.inspect_err(log_rejected_body)?;
    let invocation_id = uuid::Uuid::new_v4().to_string();

    run_pipeline(&state, &event, invocation_id.as_str()).await
}

fn log_rejected_body(rejection: &JsonRejection) {
    warn!(error = %rejection.body_text(), "rejected request body");
}

async fn run_pipeline(
    state: &AppState,
    event: &DirectoryUserEvent,
    invocation_id: &str,
) -> ApiResult<Json<InvocationResponse>> {
    let span = info_span!("invocation", invocation_id = %invocation_id);
    let outcome = state
        .lifecycle_service
        .handle_event(event)
        .instrument(span)
        .await
        .inspect_err(|error| {
            warn!(
                invocation_id = %invocation_id,
                event_id = %event.id,
                error = %error,
                "directory user event failed"
            );
        })?;

    let return_value = serde_json::to_value(&outcome).map_err(|error| {
        AppError::Internal(format!("failed to encode invocation outcome: {error}"))
    })?;

    Ok(Json(InvocationResponse::completed(return_value)))
}
